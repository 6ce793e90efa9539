use crate::{
    carousel::controller::Carousel,
    surface::paint::{Paint, Transform},
};

/// Class marking the indicator of the visible slide.
pub const ACTIVE_CLASS: &str = "is-active";
/// Class given to generated indicators.
pub const INDICATOR_CLASS: &str = "apex-testimonial-slider__dot";

/// Full visual state of `carousel` at its current index.
///
/// Track offset first, then indicator states, then slide visibility.
pub fn render(carousel: &Carousel) -> Vec<Paint> {
    let current = carousel.current_index();
    let mut paints = Vec::with_capacity(1 + carousel.indicators().len() + carousel.slide_count());

    paints.push(Paint::transform(
        carousel.track(),
        Transform::TranslateXPercent {
            pct: 0.0 - current as f64 * 100.0,
        },
    ));
    paints.extend(
        carousel
            .indicators()
            .iter()
            .enumerate()
            .map(|(i, &dot)| Paint::class(dot, ACTIVE_CLASS, i == current)),
    );
    paints.extend(
        carousel
            .slides()
            .iter()
            .enumerate()
            .map(|(i, &slide)| Paint::aria_hidden(slide, i != current)),
    );
    paints
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/view.rs"]
mod tests;
