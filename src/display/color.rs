use serde::{Deserialize, Serialize};

/// Packed 32-bit color, byte order `0xAARRGGBB`
///
/// This is the native pixel format of [`PixelBuffer`](super::PixelBuffer)
/// and of the streaming texture it is uploaded to. Serializes as the bare
/// integer so configs can write `"clear_color": 4278190080`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const GREEN: Self = Self(0xFF00_FF00);
    pub const BLUE: Self = Self(0xFF00_00FF);
    pub const YELLOW: Self = Self(0xFFFF_FF00);
    pub const CYAN: Self = Self(0xFF00_FFFF);
    pub const MAGENTA: Self = Self(0xFFFF_00FF);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Fully opaque color from RGB channels
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Same RGB with a replaced alpha byte
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((a as u32) << 24))
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 0xFF
    }

    /// `[R, G, B, 0xFF]`, the screenshot byte order. Source alpha is dropped.
    #[inline]
    pub const fn to_opaque_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), 0xFF]
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_accessors() {
        let c = Color(0x80_12_34_56);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0x12);
        assert_eq!(c.green(), 0x34);
        assert_eq!(c.blue(), 0x56);
        assert_eq!(Color::from_argb(0x80, 0x12, 0x34, 0x56), c);
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let c = Color::rgb(10, 20, 30).with_alpha(0x40);
        assert_eq!(c, Color(0x40_0A_14_1E));
        assert!(!c.is_opaque());
        assert!(Color::TRANSPARENT.is_transparent());
    }

    #[test]
    fn test_opaque_rgba_forces_alpha() {
        assert_eq!(Color(0x00_AA_BB_CC).to_opaque_rgba(), [0xAA, 0xBB, 0xCC, 0xFF]);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Color::BLACK).unwrap();
        assert_eq!(json, "4278190080");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::BLACK);
    }
}
