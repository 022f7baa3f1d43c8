//! End-to-end checks over parser, navigator and renderer together.

use pretty_assertions::assert_eq;
use rstest::rstest;
use slate_engine::{
    BoundsError, LayoutConfig, Navigator, Presentation, SlideRenderer, parse_str,
};

fn deck(count: usize) -> Presentation {
    let text = (1..=count)
        .map(|i| format!("# Slide {i}\n\nSome words for slide number {i}."))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");
    parse_str(&text, "deck.md")
}

#[rstest]
#[case("# A", 1)]
#[case("# A\n\n---\n\n# B", 2)]
#[case("# A\n\n---\n\n\n\n---\n\n# C", 2)]
#[case("\n\n---\n\n# B\n\n---\n\n", 1)]
#[case("---\ntitle: T\n---\n\n# A\n\n---\n\n# B\n\n---\n\n# C", 3)]
fn slide_count_matches_non_empty_segments(#[case] text: &str, #[case] expected: usize) {
    assert_eq!(parse_str(text, "deck.md").slide_count(), expected);
}

#[test]
fn paging_through_three_slides() {
    let presentation = parse_str("# A\n\n---\n\n# B\n\n---\n\n# C", "deck.md");
    presentation.validate().unwrap();
    let mut nav = Navigator::new(&presentation).unwrap();

    assert_eq!(nav.current_index(), 0);
    assert!(nav.next());
    assert_eq!(nav.current_index(), 1);
    assert!(nav.next());
    assert_eq!(nav.current_index(), 2);
    assert!(!nav.next());
    assert_eq!(nav.current_index(), 2);
}

#[test]
fn go_to_beyond_the_deck_is_rejected() {
    let presentation = deck(3);
    let mut nav = Navigator::new(&presentation).unwrap();

    assert_eq!(nav.go_to(5), Err(BoundsError::Index { index: 5, count: 3 }));
    assert_eq!(nav.current_index(), 0);
}

/// Deterministic pseudo-random walk over every navigator operation
#[test]
fn cursor_stays_in_bounds_for_any_operation_sequence() {
    let presentation = deck(7);
    let mut nav = Navigator::with_history_capacity(&presentation, 5).unwrap();
    let mut seed: u64 = 0x5eed;

    for _ in 0..2_000 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let roll = (seed >> 33) as usize;
        let before = nav.current_index();

        match roll % 9 {
            0 => {
                nav.next();
            }
            1 => {
                nav.previous();
            }
            2 => {
                nav.first();
            }
            3 => {
                nav.last();
            }
            4 => {
                let _ = nav.go_to(roll % 10);
            }
            5 => {
                let _ = nav.jump_forward(roll % 4);
            }
            6 => {
                let _ = nav.jump_backward(roll % 4);
            }
            7 => {
                nav.back();
            }
            _ => {
                let history = nav.history_size();
                if nav.next() {
                    assert!(nav.back());
                    assert_eq!(nav.current_index(), before);
                    assert!(nav.history_size() <= history);
                }
            }
        }

        assert!(nav.current_index() < nav.total_slides());
        assert!(nav.history_size() <= 5);
        assert!(nav.progress() > 0.0 && nav.progress() <= 1.0);
    }
}

#[test]
fn back_right_after_a_move_restores_the_index() {
    let presentation = deck(5);
    let mut nav = Navigator::new(&presentation).unwrap();
    nav.go_to(2).unwrap();

    nav.jump_forward(2).unwrap();
    assert!(nav.back());
    assert_eq!(nav.current_index(), 2);

    nav.reset();
    assert!(!nav.back());
    assert_eq!(nav.current_index(), 0);
}

#[test]
fn second_render_is_served_from_cache() {
    let presentation = deck(3);
    let nav = Navigator::new(&presentation).unwrap();
    let mut renderer = SlideRenderer::new(LayoutConfig::default(), 100, 30);

    let first = renderer.render_slide(nav.current_slide());
    let second = renderer.render_slide(nav.current_slide());

    assert_eq!(first, second);
    assert_eq!(renderer.render_count(), 1);
    assert_eq!(
        nav.current_slide().rendered_cache(),
        nav.current_slide().rendered_cache()
    );
}

#[test]
fn resize_invalidates_every_slide() {
    let presentation = deck(3);
    let mut nav = Navigator::new(&presentation).unwrap();
    let mut renderer = SlideRenderer::new(LayoutConfig::default(), 100, 30);

    renderer.render_slide(nav.current_slide());
    nav.next();
    renderer.render_slide(nav.current_slide());
    assert_eq!(renderer.render_count(), 2);

    renderer.resize(40, 20, &presentation);

    assert!(!presentation.slide(0).unwrap().has_cache());
    assert!(!presentation.slide(1).unwrap().has_cache());

    let narrow = renderer.render_slide(nav.current_slide());
    assert_eq!(renderer.render_count(), 3);
    assert!(narrow.lines().all(|line| line.chars().count() <= 40));
    assert!(!presentation.slide(0).unwrap().has_cache());
}

#[test]
fn front_matter_and_directives_flow_through() {
    let text = "---\ntitle: Demo\nauthor: Ada\ndate: 2026-03-14\n---\n\n# Slide\n<!-- @notes: Pause Here -->";
    let presentation = parse_str(text, "deck.md");

    assert_eq!(presentation.title(), "Demo");
    assert_eq!(presentation.author(), "Ada");
    assert_eq!(presentation.date().to_string(), "2026-03-14");
    assert_eq!(presentation.slide_count(), 1);

    let slide = presentation.slide(0).unwrap();
    assert_eq!(slide.metadata().notes, "pause here");

    let mut renderer = SlideRenderer::new(
        LayoutConfig {
            word_wrap: 80,
            margin: 0,
            padding: 0,
        },
        80,
        24,
    );
    assert_eq!(renderer.render_slide(slide), "SLIDE\n═════");
}
