//! Component showcase example: input fields plus a sortable user table.
//!
//! Run with: `cargo run --example showcase`

use vitrine::showcase::{email_field, password_field, search_field, user_table};
use vitrine::{
    Constraints, DrawCommand, Event, MouseButton, Point, Rect, RecordingCanvas, Size, Widget,
};

fn main() {
    println!("=== Vitrine Component Showcase ===\n");

    // Input fields in their demo states
    let mut email = email_field("not-an-email");
    let mut password = password_field("hunter2");
    let mut search = search_field("");

    for (name, field) in [
        ("email", &mut email),
        ("password", &mut password),
        ("search", &mut search),
    ] {
        let size = field.measure(Constraints::loose(Size::new(320.0, 120.0)));
        field.layout(Rect::new(0.0, 0.0, size.width, size.height));
        println!(
            "{name}: {}x{} invalid={}",
            size.width,
            size.height,
            field.is_invalid()
        );
    }

    // The user table, sorted by clicking the Name header
    let mut table = user_table();
    let size = table.measure(Constraints::loose(Size::new(1200.0, 2000.0)));
    table.layout(Rect::new(0.0, 0.0, size.width, size.height));
    println!("\nTable size: {}x{}", size.width, size.height);

    table.event(&Event::MouseDown {
        position: Point::new(100.0, 20.0),
        button: MouseButton::Left,
    });
    println!(
        "Sorted by: {:?} ({})",
        table.sort_state().field,
        table.sort_state().direction.as_str()
    );
    for row in table.visible_rows() {
        println!("  {}", row.value_or_empty("name").display());
    }

    // Paint everything and summarize the draw commands
    let mut canvas = RecordingCanvas::new();
    email.paint(&mut canvas);
    password.paint(&mut canvas);
    search.paint(&mut canvas);
    table.paint(&mut canvas);
    println!("\nGenerated {} draw commands", canvas.command_count());

    let mut rect_count = 0;
    let mut text_count = 0;
    for cmd in canvas.commands() {
        match cmd {
            DrawCommand::FillRect { .. } | DrawCommand::StrokeRect { .. } => rect_count += 1,
            DrawCommand::Text { .. } => text_count += 1,
            _ => {}
        }
    }
    println!("  - Rect commands: {rect_count}");
    println!("  - Text commands: {text_count}");

    println!("\n=== Showcase Complete ===");
}
