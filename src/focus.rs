/// Arrow-key navigation shared by carousels, tab lists and menus.
pub mod roving;
