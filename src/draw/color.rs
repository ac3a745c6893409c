/// An 8-bit-per-channel RGBA colour, as uploaded per vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const WHITE: Color32 = Color32::new(255, 255, 255, 255);
    pub const BLACK: Color32 = Color32::new(0, 0, 0, 255);

    /// Creates a colour from its four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts normalized floating-point channels, clamping each to `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Returns the same colour with its alpha channel replaced.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_channels_clamp() {
        let c = Color32::from_rgba_f32(1.5, 0.5, -1.0, 1.0);
        assert_eq!(c, Color32::new(255, 128, 0, 255));
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color32::new(10, 20, 30, 255).with_alpha(0);
        assert_eq!(c, Color32::new(10, 20, 30, 0));
    }
}
