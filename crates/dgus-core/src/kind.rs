// crates/dgus-core/src/kind.rs
use std::fmt;

/// Tag of every concrete record shape, touch and display side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    NumpadKey,
    KeyboardKey,
    Numpad,
    Increment,
    TouchSlider,
    Button,
    Keyboard,
    Icon,
    ImageAnimation,
    DisplaySlider,
    BitIcon,
    Numeric,
    Text,
    Curve,
    /// Synthetic entry for the auxiliary pointer block of a bit icon.
    AuxPointer,
}

impl RecordKind {
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::NumpadKey => "NumpadKey",
            RecordKind::KeyboardKey => "KeyboardKey",
            RecordKind::Numpad => "Numpad",
            RecordKind::Increment => "Increment",
            RecordKind::TouchSlider | RecordKind::DisplaySlider => "Slider",
            RecordKind::Button => "Button",
            RecordKind::Keyboard => "Keyboard",
            RecordKind::Icon => "Icon",
            RecordKind::ImageAnimation => "ImageAnimation",
            RecordKind::BitIcon => "BitIcon",
            RecordKind::Numeric => "Numeric",
            RecordKind::Text => "Text",
            RecordKind::Curve => "Curve",
            RecordKind::AuxPointer => "AuxPointer",
        }
    }

    pub fn is_touch(self) -> bool {
        matches!(
            self,
            RecordKind::NumpadKey
                | RecordKind::KeyboardKey
                | RecordKind::Numpad
                | RecordKind::Increment
                | RecordKind::TouchSlider
                | RecordKind::Button
                | RecordKind::Keyboard
        )
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
