//! Color constants for the portal screens

use eframe::egui::Color32;

/// Window background
pub const BG: Color32 = Color32::from_rgb(0xF3, 0xF4, 0xF6);

/// Form card background
pub const CARD_BG: Color32 = Color32::WHITE;

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xE5, 0xE7, 0xEB);

/// Top bar background
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x1F, 0x29, 0x37);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF9, 0xFA, 0xFB);

/// Primary text color
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x1F, 0x29, 0x37);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);

/// Submit buttons and links
pub const ACCENT: Color32 = Color32::from_rgb(0x25, 0x63, 0xEB);

/// Error banner text
pub const ERROR: Color32 = Color32::from_rgb(0xB9, 0x1C, 0x1C);

/// Error banner background
pub const ERROR_BG: Color32 = Color32::from_rgb(0xFE, 0xE2, 0xE2);
