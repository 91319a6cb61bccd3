//! Roving focus demo: arrow keys move the active item through a toolbar.
//!
//! Controls:
//! - Left/Right/Up/Down: move the active item (wraps at the ends)
//! - Home/End: jump to the first/last item
//! - 1-3: activate an item directly (as a click would)
//! - q / Escape: quit

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal;
use roving::prelude::*;
use std::io::{self, Write};

const LABELS: [&str; 3] = ["Save", "Preview", "Publish"];

fn draw(group: &RovingGroup, handles: &[(ItemId, ElementHandle)]) -> Result<()> {
    let mut line = String::new();
    for (index, (id, handle)) in handles.iter().enumerate() {
        // Apply the group's pending input-focus request, as a real host
        // would move its cursor here.
        let focused = handle.take_focus_request();
        let marker = if group.active() == Some(*id) { '*' } else { ' ' };
        line.push_str(&format!(
            "[{}{}{}]  ",
            marker,
            LABELS[index],
            if focused { "!" } else { "" }
        ));
    }
    let mut out = io::stdout();
    write!(out, "\r\x1b[K{line}")?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut group = RovingGroup::new().tag("toolbar");
    let mut handles = Vec::new();
    for label in LABELS {
        let item = RovingItem::as_element("button").child(label);
        handles.push((item.id(), item.handle()));
        group.push(item);
    }

    println!("Arrow keys move focus, 1-3 activate directly, q quits.");
    terminal::enable_raw_mode()?;
    let result = run(&group, &handles);
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn run(group: &RovingGroup, handles: &[(ItemId, ElementHandle)]) -> Result<()> {
    draw(group, handles)?;
    loop {
        if let Event::Key(key) = event::read()? {
            let key: KeyEvent = key.into();
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(c @ '1'..='3') => {
                    let index = c as usize - '1' as usize;
                    group.scope().activate(handles[index].0);
                }
                _ => {
                    group.handle_key(&key);
                }
            }
            draw(group, handles)?;
        }
    }
}
