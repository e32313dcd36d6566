//! The host surface the widget reads from and writes to.
//!
//! The core only ever talks to a [`View`]; hosts decide what a region is
//! (a DOM element, a terminal line, a test recorder). Regions a host does
//! not have are silently ignored.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Named regions of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Region {
    PostalCode,
    Date,
    Loading,
    Error,
    Widget,
    Location,
    WeatherDate,
    Icon,
    Condition,
    Temperature,
    Wind,
    Humidity,
    RainProb,
    SnowProb,
    Sunrise,
    Sunset,
    WeekForecast,
    DaysGrid,
}

impl Region {
    /// Element identifier used by HTML hosts.
    pub fn id(&self) -> &'static str {
        match self {
            Region::PostalCode => "zipcode",
            Region::Date => "date",
            Region::Loading => "loading",
            Region::Error => "error",
            Region::Widget => "weather-widget",
            Region::Location => "location",
            Region::WeatherDate => "weather-date",
            Region::Icon => "weather-icon",
            Region::Condition => "condition",
            Region::Temperature => "temperature",
            Region::Wind => "wind",
            Region::Humidity => "humidity",
            Region::RainProb => "rain-prob",
            Region::SnowProb => "snow-prob",
            Region::Sunrise => "sunrise",
            Region::Sunset => "sunset",
            Region::WeekForecast => "week-forecast",
            Region::DaysGrid => "days-grid",
        }
    }

    pub const fn all() -> &'static [Region] {
        &[
            Region::PostalCode,
            Region::Date,
            Region::Loading,
            Region::Error,
            Region::Widget,
            Region::Location,
            Region::WeatherDate,
            Region::Icon,
            Region::Condition,
            Region::Temperature,
            Region::Wind,
            Region::Humidity,
            Region::RainProb,
            Region::SnowProb,
            Region::Sunrise,
            Region::Sunset,
            Region::WeekForecast,
            Region::DaysGrid,
        ]
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// One card of the week grid, fully formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCard {
    pub day_name: String,
    pub short_date: String,
    pub icon: String,
    pub temperature: String,
    pub rain: String,
    pub wind: String,
    pub humidity: String,
    pub snow: String,
    /// Radar link opened in a new browsing context.
    pub href: String,
    pub title: String,
    pub selected: bool,
}

/// Read/write capability over the host surface.
pub trait View {
    /// Current value of an input region, `None` when the host lacks it.
    fn value(&self, region: Region) -> Option<String>;

    fn set_text(&mut self, region: Region, text: &str);

    fn set_visible(&mut self, region: Region, visible: bool);

    fn set_attribute(&mut self, region: Region, name: &str, value: &str);

    /// Replace the content of a container with the given cards.
    fn set_cards(&mut self, region: Region, cards: Vec<DayCard>);
}

/// A call made on a [`MemoryView`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    SetText(Region, String),
    SetVisible(Region, bool),
    SetAttribute(Region, String, String),
    SetCards(Region, usize),
}

/// In-memory view that keeps region state and records every write.
///
/// Writes to regions it was not built with are dropped, mirroring a host
/// page that lacks an element.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    present: BTreeSet<Region>,
    values: BTreeMap<Region, String>,
    texts: BTreeMap<Region, String>,
    visible: BTreeSet<Region>,
    attributes: BTreeMap<(Region, String), String>,
    cards: BTreeMap<Region, Vec<DayCard>>,
    calls: Vec<ViewCall>,
}

impl MemoryView {
    /// A view with every region present.
    pub fn new() -> Self {
        Self::with_regions(Region::all())
    }

    pub fn with_regions(regions: &[Region]) -> Self {
        Self {
            present: regions.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Same as [`MemoryView::new`] with the two inputs filled in.
    pub fn with_inputs(postal_code: &str, date: &str) -> Self {
        let mut view = Self::new();
        view.set_input(Region::PostalCode, postal_code);
        view.set_input(Region::Date, date);
        view
    }

    pub fn set_input(&mut self, region: Region, value: &str) {
        if self.present.contains(&region) {
            self.values.insert(region, value.to_string());
        }
    }

    pub fn text(&self, region: Region) -> Option<&str> {
        self.texts.get(&region).map(String::as_str)
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.contains(&region)
    }

    pub fn attribute(&self, region: Region, name: &str) -> Option<&str> {
        self.attributes
            .get(&(region, name.to_string()))
            .map(String::as_str)
    }

    pub fn cards(&self, region: Region) -> &[DayCard] {
        self.cards.get(&region).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl View for MemoryView {
    fn value(&self, region: Region) -> Option<String> {
        if !self.present.contains(&region) {
            return None;
        }
        Some(self.values.get(&region).cloned().unwrap_or_default())
    }

    fn set_text(&mut self, region: Region, text: &str) {
        if self.present.contains(&region) {
            self.texts.insert(region, text.to_string());
            self.calls.push(ViewCall::SetText(region, text.to_string()));
        }
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if !self.present.contains(&region) {
            return;
        }
        if visible {
            self.visible.insert(region);
        } else {
            self.visible.remove(&region);
        }
        self.calls.push(ViewCall::SetVisible(region, visible));
    }

    fn set_attribute(&mut self, region: Region, name: &str, value: &str) {
        if self.present.contains(&region) {
            self.attributes
                .insert((region, name.to_string()), value.to_string());
            self.calls.push(ViewCall::SetAttribute(
                region,
                name.to_string(),
                value.to_string(),
            ));
        }
    }

    fn set_cards(&mut self, region: Region, cards: Vec<DayCard>) {
        if self.present.contains(&region) {
            self.calls.push(ViewCall::SetCards(region, cards.len()));
            self.cards.insert(region, cards);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_are_unique() {
        let ids: BTreeSet<_> = Region::all().iter().map(Region::id).collect();
        assert_eq!(ids.len(), Region::all().len());
    }

    #[test]
    fn absent_regions_are_ignored() {
        let mut view = MemoryView::with_regions(&[Region::Error]);
        view.set_text(Region::Location, "Paris");
        view.set_visible(Region::Widget, true);
        view.set_text(Region::Error, "oops");

        assert_eq!(view.text(Region::Location), None);
        assert!(!view.is_visible(Region::Widget));
        assert_eq!(view.value(Region::PostalCode), None);
        assert_eq!(view.calls(), &[ViewCall::SetText(Region::Error, "oops".into())]);
    }

    #[test]
    fn present_inputs_default_to_empty() {
        let view = MemoryView::new();
        assert_eq!(view.value(Region::Date), Some(String::new()));
    }

    #[test]
    fn cards_replace_previous_content() {
        let card = DayCard {
            day_name: "lun.".into(),
            short_date: "1 janv.".into(),
            icon: "☀️".into(),
            temperature: "5°C".into(),
            rain: "0%".into(),
            wind: "3 km/h".into(),
            humidity: "50%".into(),
            snow: "NON".into(),
            href: "https://example.invalid".into(),
            title: String::new(),
            selected: false,
        };
        let mut view = MemoryView::new();
        view.set_cards(Region::DaysGrid, vec![card.clone(), card.clone()]);
        view.set_cards(Region::DaysGrid, vec![card]);
        assert_eq!(view.cards(Region::DaysGrid).len(), 1);
    }
}
