/// Basic example: render a synthetic test image straight to the terminal
///
/// Draws a hue wheel with a dark ring and a diagonal stroke, then prints it
/// once without edges, once with edge glyphs and once in the retro palette.
/// Pass `--rainbow` to finish with the animation (q to quit).
use ascii_tty::{PixelBuffer, RenderConfig, present, render_to_string};
use image::{DynamicImage, Rgba, RgbaImage};

fn test_image() -> RgbaImage {
    let width = 240;
    let height = 160;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([40, 40, 40, 255]));

    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 60.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                // Hue follows the angle, brightness falls off to the rim
                let hue = (dy.atan2(dx).to_degrees() + 360.0) % 360.0;
                let value = 1.0 - 0.6 * dist / radius;
                img.put_pixel(x, y, hue_pixel(hue, value));
            } else if (dist - radius).abs() < 4.0 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }

    // Diagonal white stroke, three pixels wide
    for i in 0..height {
        for offset in 0..3 {
            let x = i + offset;
            if x < width {
                img.put_pixel(x, i, Rgba([255, 255, 255, 255]));
            }
        }
    }

    img
}

fn hue_pixel(hue: f32, value: f32) -> Rgba<u8> {
    let sector = hue / 60.0;
    let f = sector - sector.floor();
    let (r, g, b) = match sector as u32 {
        0 => (1.0, f, 0.0),
        1 => (1.0 - f, 1.0, 0.0),
        2 => (0.0, 1.0, f),
        3 => (0.0, 1.0 - f, 1.0),
        4 => (f, 0.0, 1.0),
        _ => (1.0, 0.0, 1.0 - f),
    };
    let byte = |c: f32| (c * value * 255.0).round() as u8;
    Rgba([byte(r), byte(g), byte(b), 255])
}

fn main() -> ascii_tty::Result<()> {
    let rainbow = std::env::args().any(|arg| arg == "--rainbow");

    let img = test_image();
    println!("Created test image: {}x{}", img.width(), img.height());
    let source = PixelBuffer::from_image(&DynamicImage::ImageRgba8(img))?;

    let plain = RenderConfig {
        max_width: 60,
        max_height: 30,
        ..Default::default()
    };
    println!("\nTruecolor, no edges:");
    print!("{}", render_to_string(&source, &plain)?);

    let edged = RenderConfig {
        edge_threshold: 1.0,
        ..plain.clone()
    };
    println!("\nTruecolor, edge threshold {}:", edged.edge_threshold);
    print!("{}", render_to_string(&source, &edged)?);

    let retro = RenderConfig {
        use_retro_colors: true,
        ..edged.clone()
    };
    println!("\nRetro palette:");
    print!("{}", render_to_string(&source, &retro)?);
    println!();

    if rainbow {
        present(
            &source,
            &RenderConfig {
                use_rainbow: true,
                ..edged
            },
        )?;
    }

    Ok(())
}
