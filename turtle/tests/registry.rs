// turtleart/turtle/tests/registry.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use turtleart_turtle::shapes::generate_turtle_shapes;
use turtleart_turtle::{
    Diagnostics, Image, LabelId, Rgb, Shape, SpriteId, TurtleColors, TurtleError,
};

use common::{headless, interactive, sharing, SpriteCall, SpriteLog, TestStage};

fn stamp(side: u32) -> Shape {
    Shape::Image(Image::new(side, side, vec![0u8; 16]))
}

#[test]
fn set_turtle_creates_at_origin_and_activates() {
    let (mut session, _) = headless();
    {
        let (turtle, window) = session.active();
        turtle.forward(window, 50.0, false);
    }

    session.set_turtle("bob", None).unwrap();
    assert_eq!(session.turtles().active_name(), "bob");
    assert_eq!(session.turtles().turtle_count(), 2);
    let bob = session.turtles().active_turtle();
    assert_eq!(bob.xy(), (0.0, 0.0));
    assert_eq!(bob.heading(), 0.0);
    assert!(bob.pen_state());

    session.set_turtle("Yertle", None).unwrap();
    assert_eq!(session.turtles().active_turtle().xy(), (0.0, 50.0));
}

#[test]
fn set_turtle_with_colors_reskins() {
    let (mut session, _) = headless();
    let colors = TurtleColors::new(Rgb(0xff, 0, 0), Rgb(0, 0, 0xff));
    session.set_turtle("bob", Some(colors)).unwrap();
    assert_eq!(session.turtles().active_turtle().colors(), colors);

    let other = TurtleColors::new(Rgb(0, 0xff, 0), Rgb(0, 0, 0));
    session.set_turtle("bob", Some(other)).unwrap();
    let bob = session.turtles().active_turtle();
    assert_eq!(bob.colors(), other);
    assert_eq!(bob.shapes(), &generate_turtle_shapes(&other).unwrap()[..]);
}

#[test]
fn unknown_active_turtle_is_an_error() {
    let (mut session, _) = headless();
    let (turtles, _) = session.parts();
    assert!(matches!(
        turtles.set_active_turtle("nobody"),
        Err(TurtleError::NoSuchTurtle(_))
    ));
    assert_eq!(turtles.active_name(), "Yertle");
}

#[test]
fn reset_spares_remote_turtles() {
    let (mut session, _, _) = sharing("me");
    {
        let (turtles, window) = session.parts();
        turtles.set_turtle(window, "peer", None).unwrap();
        let peer = turtles.active_turtle_mut();
        peer.set_remote();
        peer.forward(window, 40.0, false);
        peer.set_pen_size(window, 9.0, false);

        turtles.set_turtle(window, "Yertle", None).unwrap();
        let yertle = turtles.active_turtle_mut();
        yertle.forward(window, 40.0, false);
        yertle.set_color(window, 33.0, false);
        yertle.set_pen_size(window, 9.0, false);
        yertle.set_fill(true);
    }

    session.reset_turtles().unwrap();

    let turtles = session.turtles();
    let peer = turtles.get("peer").unwrap();
    assert_eq!(peer.xy(), (0.0, 40.0));
    assert_eq!(peer.pen_size(), 9.0);

    let yertle = turtles.get("Yertle").unwrap();
    assert_eq!(yertle.xy(), (0.0, 0.0));
    assert_eq!(yertle.color(), 0.0);
    assert_eq!(yertle.shade(), 50.0);
    assert_eq!(yertle.gray(), 100.0);
    assert_eq!(yertle.pen_size(), 5.0);
    assert!(yertle.pen_state());
    assert!(!yertle.fill());
    assert_eq!(turtles.active_name(), "Yertle");
}

#[test]
fn sprites_follow_heading_buckets() {
    let log = SpriteLog::default();
    let (mut session, _) = interactive(TestStage::new(log.clone()));
    let (turtle, window) = session.active();
    log.borrow_mut().clear();

    turtle.set_heading(window, 94.0, false);
    assert_eq!(
        log.borrow().last(),
        Some(&SpriteCall::SetShape(SpriteId(0), turtle.shapes()[9].clone()))
    );
    turtle.right(window, 2.0, false);
    assert_eq!(
        log.borrow().last(),
        Some(&SpriteCall::SetShape(SpriteId(0), turtle.shapes()[10].clone()))
    );
}

#[test]
fn sprites_are_centered_on_the_turtle() {
    let log = SpriteLog::default();
    let (mut session, _) = interactive(TestStage::new(log.clone()));
    let (turtle, window) = session.active();
    log.borrow_mut().clear();

    turtle.move_turtle(window, (10.0, 10.0));
    // 55px turtle, so the corner sits 27px up and left of the center.
    assert_eq!(
        log.borrow()[..],
        [SpriteCall::MoveTo(SpriteId(0), (583.0, 413.0))]
    );
}

#[test]
fn hide_and_show_move_the_label_too() {
    let log = SpriteLog::default();
    let stage = TestStage::new(log.clone()).with_label(LabelId(7));
    let (mut session, _) = interactive(stage);
    let (turtle, window) = session.active();
    turtle.set_label(Some(LabelId(7)));
    log.borrow_mut().clear();

    turtle.hide(window);
    assert!(turtle.is_hidden());
    assert_eq!(
        log.borrow()[..],
        [SpriteCall::Hide(SpriteId(0)), SpriteCall::Hide(SpriteId(1007))]
    );
    log.borrow_mut().clear();

    turtle.show(window);
    assert!(!turtle.is_hidden());
    let calls = log.borrow();
    assert_eq!(calls[0], SpriteCall::SetLayer(SpriteId(0), 500));
    assert!(calls.contains(&SpriteCall::SetLayer(SpriteId(1007), 501)));
}

#[test]
fn spr_to_turtle_finds_owner() {
    let log = SpriteLog::default();
    let (mut session, _) = interactive(TestStage::new(log));
    session.set_turtle("bob", None).unwrap();
    let turtles = session.turtles();
    assert_eq!(turtles.spr_to_turtle(SpriteId(1)).unwrap().name(), "bob");
    assert_eq!(turtles.spr_to_turtle(SpriteId(0)).unwrap().name(), "Yertle");
    assert!(turtles.spr_to_turtle(SpriteId(9)).is_none());
}

#[test]
fn single_image_at_heading_zero_fills_every_bucket() {
    let (mut session, _) = headless();
    let (turtle, window) = session.active();

    turtle.set_shapes(window, vec![stamp(30)], 0);
    assert!(turtle.has_custom_shapes());
    assert_eq!(turtle.shapes().len(), 36);
    assert!(turtle
        .shapes()
        .iter()
        .all(|shape| matches!(shape, Shape::Rotated { side: 42, .. })));
}

#[test]
fn single_image_elsewhere_replaces_one_bucket() {
    let (mut session, _) = headless();
    let (turtle, window) = session.active();
    let stock = turtle.shapes().to_vec();

    turtle.set_heading(window, 90.0, false);
    turtle.set_shapes(window, vec![stamp(30)], 0);
    assert_eq!(turtle.shapes()[9], stamp(30));
    assert_eq!(turtle.shapes()[8], stock[8]);

    turtle.set_shapes(window, vec![stamp(12)], 3);
    assert_eq!(turtle.shapes()[3], stamp(12));
    assert_eq!(turtle.shapes()[9], stamp(30));
}

#[test]
fn wrong_image_count_uses_the_first() {
    let (mut session, _) = headless();
    let (turtle, window) = session.active();
    turtle.set_heading(window, 180.0, false);

    turtle.set_shapes(window, vec![stamp(5), stamp(6)], 0);
    assert_eq!(turtle.shapes()[18], stamp(5));
    assert!(window.diagnostics().contains(Diagnostics::IGNORED_SHAPES));
}

#[test]
fn reset_shapes_restores_stock_images() {
    let (mut session, _) = headless();
    let (turtle, window) = session.active();
    let stock = turtle.shapes().to_vec();

    turtle.set_shapes(window, (0..36).map(stamp).collect(), 0);
    assert_eq!(turtle.shapes()[4], stamp(4));
    turtle.reset_shapes().unwrap();
    assert!(!turtle.has_custom_shapes());
    assert_eq!(turtle.shapes(), &stock[..]);
}
