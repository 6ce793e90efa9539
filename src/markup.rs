/// Element tree supplied by the markup provider.
pub mod document;
