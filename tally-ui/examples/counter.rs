//! Counter example - drives the demo page and prints the patches it emits

use std::time::Duration;
use tally_ui::prelude::*;

fn main() {
    let mut page = Page::demo();
    page.take_patches();

    let first = page.counters()[0].id();
    page.send(first, &Event::click(Action::Increment)).ok();
    page.send(first, &Event::click(Action::Increment)).ok();
    page.select_theme("purple").ok();

    for patch in page.take_patches() {
        println!("widget {}:\n{}\n", patch.widget, patch.html);
    }

    page.advance(Duration::from_millis(500));
    for counter in page.counters() {
        println!("{} -> {} (animating: {})", counter.id(), counter.count(), counter.is_animating());
    }
}
