use serde::Deserialize;

/// Viewport class used to size content regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];

    /// Modifier class on the content region; part of the stylesheet contract.
    pub fn class_name(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }
}

/// Resolved sizing for one content region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSize {
    pub breakpoint: Breakpoint,
    pub height_px: u32,
}

impl ContentSize {
    pub fn height_css(&self) -> String {
        format!("{}px", self.height_px)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Inclusive upper bound of the mobile range.
    pub mobile_max_width: f64,
    /// Inclusive upper bound of the tablet range.
    pub tablet_max_width: f64,
    pub mobile_height_px: u32,
    pub tablet_height_px: u32,
    pub desktop_height_px: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            mobile_max_width: 480.0,
            tablet_max_width: 768.0,
            mobile_height_px: 450,
            tablet_height_px: 500,
            desktop_height_px: 600,
        }
    }
}

impl LayoutSettings {
    pub fn breakpoint_for(&self, viewport_width: f64) -> Breakpoint {
        if viewport_width <= self.mobile_max_width {
            Breakpoint::Mobile
        } else if viewport_width <= self.tablet_max_width {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn content_size(&self, viewport_width: f64) -> ContentSize {
        let breakpoint = self.breakpoint_for(viewport_width);
        let height_px = match breakpoint {
            Breakpoint::Mobile => self.mobile_height_px,
            Breakpoint::Tablet => self.tablet_height_px,
            Breakpoint::Desktop => self.desktop_height_px,
        };
        ContentSize {
            breakpoint,
            height_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Breakpoint, LayoutSettings};

    #[test]
    fn boundaries_are_inclusive_on_the_lower_class() {
        let layout = LayoutSettings::default();
        assert_eq!(layout.breakpoint_for(320.0), Breakpoint::Mobile);
        assert_eq!(layout.breakpoint_for(480.0), Breakpoint::Mobile);
        assert_eq!(layout.breakpoint_for(480.5), Breakpoint::Tablet);
        assert_eq!(layout.breakpoint_for(768.0), Breakpoint::Tablet);
        assert_eq!(layout.breakpoint_for(769.0), Breakpoint::Desktop);
    }

    #[test]
    fn heights_follow_breakpoints() {
        let layout = LayoutSettings::default();
        assert_eq!(layout.content_size(400.0).height_px, 450);
        assert_eq!(layout.content_size(700.0).height_px, 500);
        assert_eq!(layout.content_size(1280.0).height_css(), "600px");
    }
}
