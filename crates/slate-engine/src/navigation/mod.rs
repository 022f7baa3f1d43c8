pub mod history;

use crate::models::{BoundsError, Presentation, Slide, ValidationError};

pub use history::{DEFAULT_HISTORY_CAPACITY, History};

/// Cursor over a presentation with bounded "back" history.
///
/// The cursor always satisfies `0 <= current < total`. Paging moves
/// (`next`, `previous`, `first`, `last`) stop at the edges and report `false`;
/// explicit targets (`go_to`, jumps) outside the deck are rejected with a
/// [`BoundsError`] and leave the cursor where it was. A position is pushed onto
/// the history only when the cursor actually moves, and `back` never pushes.
#[derive(Debug)]
pub struct Navigator<'a> {
    presentation: &'a Presentation,
    current: usize,
    history: History,
}

impl<'a> Navigator<'a> {
    pub fn new(presentation: &'a Presentation) -> Result<Self, ValidationError> {
        Self::with_history_capacity(presentation, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(
        presentation: &'a Presentation,
        capacity: usize,
    ) -> Result<Self, ValidationError> {
        if presentation.is_empty() {
            return Err(ValidationError::NoSlides);
        }
        Ok(Self {
            presentation,
            current: 0,
            history: History::with_capacity(capacity),
        })
    }

    fn last_index(&self) -> usize {
        self.presentation.slide_count() - 1
    }

    /// Move to `target`, recording the old position if it differs
    fn move_to(&mut self, target: usize) -> bool {
        if target == self.current {
            return false;
        }
        self.history.push(self.current);
        self.current = target;
        true
    }

    fn check(&self, index: usize) -> Result<usize, BoundsError> {
        if self.can_navigate(index) {
            Ok(index)
        } else {
            Err(BoundsError::Index {
                index,
                count: self.total_slides(),
            })
        }
    }

    pub fn next(&mut self) -> bool {
        self.has_next() && self.move_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.has_previous() && self.move_to(self.current - 1)
    }

    pub fn first(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.move_to(self.last_index())
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), BoundsError> {
        let target = self.check(index)?;
        self.move_to(target);
        Ok(())
    }

    /// Go to a 1-based slide number
    pub fn go_to_slide_number(&mut self, number: usize) -> Result<(), BoundsError> {
        match number.checked_sub(1) {
            Some(index) if self.can_navigate(index) => self.go_to(index),
            _ => Err(BoundsError::SlideNumber {
                number,
                count: self.total_slides(),
            }),
        }
    }

    /// Move forward by `count`; unlike `next` this never clamps
    pub fn jump_forward(&mut self, count: usize) -> Result<(), BoundsError> {
        let target = self.current.saturating_add(count);
        self.go_to(target)
    }

    /// Move backward by `count`; unlike `previous` this never clamps
    pub fn jump_backward(&mut self, count: usize) -> Result<(), BoundsError> {
        match self.current.checked_sub(count) {
            Some(target) => self.go_to(target),
            None => Err(BoundsError::BeforeStart {
                from: self.current,
                steps: count,
            }),
        }
    }

    /// Return to the most recently recorded position
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide_number(&self) -> usize {
        self.current + 1
    }

    pub fn current_slide(&self) -> &'a Slide {
        &self.presentation.slides()[self.current]
    }

    pub fn slide_at(&self, index: usize) -> Result<&'a Slide, BoundsError> {
        self.presentation.slide(index)
    }

    pub fn total_slides(&self) -> usize {
        self.presentation.slide_count()
    }

    pub fn can_navigate(&self, index: usize) -> bool {
        index < self.total_slides()
    }

    pub fn has_next(&self) -> bool {
        self.current < self.last_index()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last_index()
    }

    /// Fraction of the deck reached, in `(0, 1]`
    pub fn progress(&self) -> f64 {
        self.current_slide_number() as f64 / self.total_slides() as f64
    }

    pub fn progress_text(&self) -> String {
        format!("{}/{}", self.current_slide_number(), self.total_slides())
    }

    pub fn history_size(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.clear_history();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_str;
    use pretty_assertions::assert_eq;

    fn deck(count: usize) -> Presentation {
        let text = (1..=count)
            .map(|i| format!("# Slide {i}"))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");
        parse_str(&text, "deck.md")
    }

    #[test]
    fn test_starts_at_first_slide() {
        let presentation = deck(3);
        let nav = Navigator::new(&presentation).unwrap();

        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.current_slide_number(), 1);
        assert_eq!(nav.total_slides(), 3);
        assert!(nav.is_first());
        assert!(!nav.is_last());
        assert_eq!(nav.history_size(), 0);
    }

    #[test]
    fn test_rejects_empty_presentation() {
        let presentation = Presentation::new("empty.md");
        assert_eq!(
            Navigator::new(&presentation).unwrap_err(),
            ValidationError::NoSlides
        );
    }

    #[test]
    fn test_next_stops_at_last() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();

        assert!(nav.next());
        assert_eq!(nav.current_index(), 1);
        assert!(nav.next());
        assert_eq!(nav.current_index(), 2);
        assert!(!nav.next());
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.history_size(), 2);
    }

    #[test]
    fn test_previous_stops_at_first() {
        let presentation = deck(2);
        let mut nav = Navigator::new(&presentation).unwrap();

        assert!(!nav.previous());
        assert_eq!(nav.history_size(), 0);

        nav.next();
        assert!(nav.previous());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_first_and_last_only_record_real_moves() {
        let presentation = deck(4);
        let mut nav = Navigator::new(&presentation).unwrap();

        assert!(!nav.first());
        assert_eq!(nav.history_size(), 0);

        assert!(nav.last());
        assert_eq!(nav.current_index(), 3);
        assert!(!nav.last());
        assert_eq!(nav.history_size(), 1);

        assert!(nav.first());
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.history_size(), 2);
    }

    #[test]
    fn test_go_to() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();

        nav.go_to(2).unwrap();
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.history_size(), 1);

        nav.go_to(2).unwrap();
        assert_eq!(nav.history_size(), 1);
    }

    #[test]
    fn test_go_to_out_of_bounds_is_rejected() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();
        nav.next();

        assert_eq!(nav.go_to(5), Err(BoundsError::Index { index: 5, count: 3 }));
        assert!(nav.go_to(3).is_err());
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.history_size(), 1);
    }

    #[test]
    fn test_go_to_slide_number() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();

        nav.go_to_slide_number(3).unwrap();
        assert_eq!(nav.current_index(), 2);
        assert_eq!(
            nav.go_to_slide_number(0),
            Err(BoundsError::SlideNumber {
                number: 0,
                count: 3
            })
        );
        assert_eq!(
            nav.go_to_slide_number(4),
            Err(BoundsError::SlideNumber {
                number: 4,
                count: 3
            })
        );
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_jumps_do_not_clamp() {
        let presentation = deck(5);
        let mut nav = Navigator::new(&presentation).unwrap();

        nav.jump_forward(3).unwrap();
        assert_eq!(nav.current_index(), 3);

        assert!(nav.jump_forward(2).is_err());
        assert_eq!(nav.current_index(), 3);

        let err = nav.jump_backward(4).unwrap_err();
        assert_eq!(err, BoundsError::BeforeStart { from: 3, steps: 4 });
        assert_eq!(
            err.to_string(),
            "cannot jump back 4 slides from slide index 3"
        );
        assert_eq!(nav.current_index(), 3);

        nav.jump_backward(3).unwrap();
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.history_size(), 2);
    }

    #[test]
    fn test_zero_jump_does_not_record_history() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();

        nav.jump_forward(0).unwrap();
        assert_eq!(nav.history_size(), 0);
    }

    #[test]
    fn test_huge_jump_is_rejected() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();
        nav.next();

        assert!(nav.jump_forward(usize::MAX).is_err());
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_back_restores_previous_position() {
        let presentation = deck(5);
        let mut nav = Navigator::new(&presentation).unwrap();

        nav.go_to(3).unwrap();
        nav.next();
        assert!(nav.back());
        assert_eq!(nav.current_index(), 3);
        assert!(nav.back());
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.back());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_back_never_pushes() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();

        nav.next();
        nav.next();
        nav.back();
        assert_eq!(nav.history_size(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let presentation = deck(2);
        let mut nav = Navigator::with_history_capacity(&presentation, 3).unwrap();

        for _ in 0..10 {
            nav.next();
            nav.previous();
        }

        assert_eq!(nav.history_size(), 3);
    }

    #[test]
    fn test_progress() {
        let presentation = deck(4);
        let mut nav = Navigator::new(&presentation).unwrap();

        assert_eq!(nav.progress(), 0.25);
        assert_eq!(nav.progress_text(), "1/4");

        nav.last();
        assert_eq!(nav.progress(), 1.0);
        assert_eq!(nav.progress_text(), "4/4");
    }

    #[test]
    fn test_single_slide_deck() {
        let presentation = deck(1);
        let mut nav = Navigator::new(&presentation).unwrap();

        assert!(nav.is_first());
        assert!(nav.is_last());
        assert!(!nav.has_next());
        assert!(!nav.has_previous());
        assert!(!nav.next());
        assert!(!nav.last());
        assert_eq!(nav.progress(), 1.0);
    }

    #[test]
    fn test_reset() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();
        nav.last();

        nav.reset();

        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.history_size(), 0);
        assert!(!nav.back());
    }

    #[test]
    fn test_current_slide_follows_cursor() {
        let presentation = deck(3);
        let mut nav = Navigator::new(&presentation).unwrap();
        nav.next();

        assert_eq!(nav.current_slide().content(), "# Slide 2");
        assert_eq!(nav.slide_at(2).unwrap().content(), "# Slide 3");
        assert!(nav.slide_at(3).is_err());
    }
}
