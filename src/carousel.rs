//! Bounded, steppable index over a fixed list of composite images.
//!
//! Stepping clamps at both ends instead of wrapping. A state for an empty
//! collection cannot be built, so [`advance`] is total.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    First,
    Prev,
    Next,
    Last,
}

impl Direction {
    /// Navigation order used by the rendered controls.
    pub const ALL: [Self; 4] = [Self::First, Self::Prev, Self::Next, Self::Last];

    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Prev => "Previous",
            Self::Next => "Next",
            Self::Last => "Last",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    len: usize,
}

impl CarouselState {
    /// State positioned on the first slide, `None` for an empty collection.
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { index: 0, len })
        }
    }

    /// State positioned on the latest slide.
    pub const fn latest(len: usize) -> Option<Self> {
        match Self::new(len) {
            Some(state) => Some(advance(state, Direction::Last).0),
            None => None,
        }
    }

    pub const fn index(self) -> usize {
        self.index
    }

    pub const fn len(self) -> usize {
        self.len
    }

    pub const fn is_first(self) -> bool {
        self.index == 0
    }

    pub const fn is_last(self) -> bool {
        self.index + 1 == self.len
    }
}

/// Steps the carousel and returns the new state with the index to display.
pub const fn advance(state: CarouselState, direction: Direction) -> (CarouselState, usize) {
    let last = state.len - 1;
    let index = match direction {
        Direction::Next => {
            if state.index < last {
                state.index + 1
            } else {
                last
            }
        }
        Direction::Prev => state.index.saturating_sub(1),
        Direction::First => 0,
        Direction::Last => last,
    };
    (
        CarouselState {
            index,
            len: state.len,
        },
        index,
    )
}

pub trait Slide {
    fn image(&self) -> &str;
    fn caption(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailySlide {
    pub image: String,
    pub date: String,
}

impl Slide for DailySlide {
    fn image(&self) -> &str {
        &self.image
    }

    fn caption(&self) -> String {
        self.date.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeeklySlide {
    pub image: String,
    pub monday: String,
    pub sunday: String,
}

impl Slide for WeeklySlide {
    fn image(&self) -> &str {
        &self.image
    }

    fn caption(&self) -> String {
        format!("Weekly composite from {} to {}", self.monday, self.sunday)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKind {
    Daily,
    Weekly,
}

impl CarouselKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Daily => "Daily composites",
            Self::Weekly => "Weekly composites",
        }
    }

    /// Output directory of the per-slide pages.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// A slide list together with the position the viewer is on.
#[derive(Debug)]
pub struct Carousel<'a, S> {
    slides: &'a [S],
    state: CarouselState,
}

impl<'a, S: Slide> Carousel<'a, S> {
    pub const fn first(slides: &'a [S]) -> Option<Self> {
        match CarouselState::new(slides.len()) {
            Some(state) => Some(Self { slides, state }),
            None => None,
        }
    }

    pub const fn latest(slides: &'a [S]) -> Option<Self> {
        match CarouselState::latest(slides.len()) {
            Some(state) => Some(Self { slides, state }),
            None => None,
        }
    }

    pub const fn state(&self) -> CarouselState {
        self.state
    }

    pub fn current(&self) -> &'a S {
        &self.slides[self.state.index()]
    }

    pub fn step(&mut self, direction: Direction) -> &'a S {
        let (state, shown) = advance(self.state, direction);
        self.state = state;
        &self.slides[shown]
    }

    /// Index each navigation control leads to from `state`.
    pub fn targets(state: CarouselState) -> [(Direction, usize); 4] {
        Direction::ALL.map(|direction| (direction, advance(state, direction).1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(index: usize, len: usize) -> CarouselState {
        CarouselState { index, len }
    }

    fn daily(dates: &[&str]) -> Vec<DailySlide> {
        dates
            .iter()
            .map(|date| DailySlide {
                image: format!("img/{date}.png"),
                date: (*date).to_string(),
            })
            .collect()
    }

    #[test]
    fn prev_clamps_at_first_slide() {
        assert_eq!(advance(state(0, 5), Direction::Prev), (state(0, 5), 0));
        assert_eq!(advance(state(3, 5), Direction::Prev).1, 2);
    }

    #[test]
    fn next_clamps_at_last_slide() {
        assert_eq!(advance(state(4, 5), Direction::Next), (state(4, 5), 4));
        assert_eq!(advance(state(1, 5), Direction::Next).1, 2);
    }

    #[test]
    fn first_and_last_jump_to_ends() {
        assert_eq!(advance(state(2, 5), Direction::Last).1, 4);
        assert_eq!(advance(state(2, 5), Direction::First).1, 0);
    }

    #[test]
    fn single_slide_never_moves() {
        for direction in Direction::ALL {
            assert_eq!(advance(state(0, 1), direction).1, 0);
        }
    }

    #[test]
    fn empty_collection_has_no_state() {
        assert_eq!(CarouselState::new(0), None);
        assert_eq!(CarouselState::latest(0), None);
        let none: [DailySlide; 0] = [];
        assert!(Carousel::latest(&none).is_none());
    }

    #[test]
    fn carousel_starts_on_latest_and_steps() {
        let slides = daily(&["2024-05-01", "2024-05-02", "2024-05-03"]);
        let mut carousel = Carousel::latest(&slides).unwrap();
        assert!(carousel.state().is_last());
        assert_eq!(carousel.current().caption(), "2024-05-03");
        assert_eq!(carousel.step(Direction::Next).date, "2024-05-03");
        assert_eq!(carousel.step(Direction::Prev).date, "2024-05-02");
        assert_eq!(carousel.step(Direction::First).image(), "img/2024-05-01.png");
        assert!(carousel.state().is_first());
        assert_eq!(carousel.step(Direction::Prev).date, "2024-05-01");
    }

    #[test]
    fn navigation_targets_follow_advance() {
        let targets = Carousel::<DailySlide>::targets(state(0, 3));
        assert_eq!(
            targets,
            [
                (Direction::First, 0),
                (Direction::Prev, 0),
                (Direction::Next, 1),
                (Direction::Last, 2),
            ]
        );
    }

    #[test]
    fn weekly_caption_names_the_week() {
        let slide = WeeklySlide {
            image: "w.png".to_string(),
            monday: "06/05/2024".to_string(),
            sunday: "12/05/2024".to_string(),
        };
        assert_eq!(
            slide.caption(),
            "Weekly composite from 06/05/2024 to 12/05/2024"
        );
    }
}
