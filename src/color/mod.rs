use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use smart_leds::hsv::hsv2rgb;

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Convert a 0xRRGGBB value to a color
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(value: u32) -> Rgb {
    Rgb {
        r: (value >> 16) as u8,
        g: (value >> 8) as u8,
        b: value as u8,
    }
}

/// Fully saturated color at a position on the hue wheel
pub fn wheel(hue: u8, value: u8) -> Rgb {
    hsv2rgb(Hsv {
        hue,
        sat: 255,
        val: value,
    })
}

/// Scale every channel of a color by `scale / 256`
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: ((color.r as u16 * scale as u16) >> 8) as u8,
        g: ((color.g as u16 * scale as u16) >> 8) as u8,
        b: ((color.b as u16 * scale as u16) >> 8) as u8,
    }
}

/// Linear blend between two colors, `amount` 0 keeps `a`, 255 gives `b`
#[allow(clippy::cast_possible_truncation)]
pub const fn blend_colors(a: Rgb, b: Rgb, amount: u8) -> Rgb {
    const fn blend(a: u8, b: u8, amount: u8) -> u8 {
        let amount = amount as i32;
        let a = a as i32;
        let b = b as i32;
        (a + ((b - a) * amount) / 255) as u8
    }

    Rgb {
        r: blend(a.r, b.r, amount),
        g: blend(a.g, b.g, amount),
        b: blend(a.b, b.b, amount),
    }
}
