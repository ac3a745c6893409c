//! Tessellates a few sample shapes with every join style and prints what
//! would be submitted to the GPU.
//!
//! Usage:
//! ```text
//! cargo run --example dump_polyline                    # all join styles, smooth
//! cargo run --example dump_polyline -- bevel rough     # one join style and line style
//! RUST_LOG=polystroke=trace cargo run --example dump_polyline
//! ```

use polystroke::draw::{Color32, RecordedDraw, RecordingRasterizer};
use polystroke::graphics::LineRenderer;
use polystroke::tessellation::{LineJoin, LineStyle};
use polystroke::Result;

const SHAPES: [(&str, &[f32]); 4] = [
    ("segment", &[0.0, 0.0, 100.0, 0.0]),
    ("corner", &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]),
    ("zigzag", &[0.0, 0.0, 20.0, 30.0, 40.0, 0.0, 60.0, 30.0, 80.0, 0.0]),
    (
        "square",
        &[0.0, 0.0, 50.0, 0.0, 50.0, 50.0, 0.0, 50.0, 0.0, 0.0],
    ),
];

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for polystroke.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("dump_polyline=info".parse().unwrap_or_default())
        .add_directive("polystroke=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let joins = match args.next() {
        Some(join) => vec![join.parse::<LineJoin>()?],
        None => LineJoin::ALL.to_vec(),
    };
    let style = match args.next() {
        Some(style) => style.parse::<LineStyle>()?,
        None => LineStyle::Smooth,
    };

    let mut gfx = LineRenderer::new();
    gfx.set_line_width(4.0)?;
    gfx.set_line_style(style);
    gfx.set_color(Color32::from_rgba_f32(1.0, 0.5, 0.0, 1.0));

    for join in joins {
        gfx.set_line_join(join);
        for (name, coords) in SHAPES {
            let mut recorder = RecordingRasterizer::new();
            gfx.polyline(coords, &mut recorder)?;
            for draw in recorder.draws() {
                print_draw(join, name, draw);
            }
        }
    }
    Ok(())
}

fn print_draw(join: LineJoin, shape: &str, draw: &RecordedDraw) {
    let transparent = draw
        .colors
        .as_ref()
        .map_or(0, |colors| colors.iter().filter(|c| c.a == 0).count());
    println!(
        "{:>5} {shape:<8} {:?}: {} vertices, {} triangles, {transparent} transparent",
        join.as_str(),
        draw.mode,
        draw.positions.len(),
        draw.triangles().len(),
    );
    for p in &draw.positions {
        println!("        ({:9.3}, {:9.3})", p.x, p.y);
    }
}
