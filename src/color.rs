use std::fmt::Display;

use image::Rgb;

/// 24 bit color key, red in bits 16-23, green in bits 8-15, blue in bits 0-7.
pub type PackedColor = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RGBColorFormat {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RGBColorFormat {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        RGBColorFormat { red, green, blue }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn pack(&self) -> PackedColor {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    pub fn unpack(packed: PackedColor) -> Self {
        RGBColorFormat {
            red: ((packed >> 16) & 0xFF) as u8,
            green: ((packed >> 8) & 0xFF) as u8,
            blue: (packed & 0xFF) as u8,
        }
    }
}

#[cfg(test)]
impl RGBColorFormat {
    pub fn red() -> Self {
        Self::new(255, 0, 0)
    }

    pub fn green() -> Self {
        Self::new(0, 255, 0)
    }

    pub fn blue() -> Self {
        Self::new(0, 0, 255)
    }
}

impl From<&RGBColorFormat> for PackedColor {
    fn from(value: &RGBColorFormat) -> Self {
        value.pack()
    }
}

impl From<PackedColor> for RGBColorFormat {
    fn from(value: PackedColor) -> Self {
        RGBColorFormat::unpack(value)
    }
}

impl From<&Rgb<u8>> for RGBColorFormat {
    fn from(value: &Rgb<u8>) -> Self {
        let [red, green, blue] = value.0;
        RGBColorFormat { red, green, blue }
    }
}

impl From<RGBColorFormat> for Rgb<u8> {
    fn from(value: RGBColorFormat) -> Self {
        Rgb([value.red, value.green, value.blue])
    }
}

impl Display for RGBColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.pack())
    }
}

#[cfg(test)]
mod test {
    use image::Rgb;

    use super::RGBColorFormat;

    #[test]
    fn pack_places_channels_in_expected_bits() {
        let color = RGBColorFormat::new(0x12, 0x34, 0x56);
        assert_eq!(color.pack(), 0x123456);
    }

    #[test]
    fn unpack_ignores_bits_above_24() {
        let color = RGBColorFormat::unpack(0xFF_AB_CD_EF);
        assert_eq!(color, RGBColorFormat::new(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn convert_from_and_into_image_pixel() {
        let pixel = Rgb([10, 20, 30]);
        let color = RGBColorFormat::from(&pixel);
        assert_eq!(color, RGBColorFormat::new(10, 20, 30));
        assert_eq!(Rgb::from(color), pixel);
    }

    #[test]
    fn default_is_black() {
        assert_eq!(RGBColorFormat::default(), RGBColorFormat::black());
        assert_eq!(RGBColorFormat::black().to_string(), "#000000");
    }
}
