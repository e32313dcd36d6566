//! Terminal implementation of the widget's host surface.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{self, Write};

use meteo_core::{DayCard, Region, View};

/// Collects what the widget writes and prints it once the run is over.
#[derive(Debug, Default)]
pub struct TerminalView {
    inputs: HashMap<Region, String>,
    texts: BTreeMap<Region, String>,
    visible: BTreeSet<Region>,
    attributes: HashMap<(Region, String), String>,
    cards: Vec<DayCard>,
}

const DETAIL_ROWS: &[(Region, &str)] = &[
    (Region::Wind, "Vent"),
    (Region::Humidity, "Humidité"),
    (Region::RainProb, "Pluie"),
    (Region::SnowProb, "Neige"),
    (Region::Sunrise, "Lever"),
    (Region::Sunset, "Coucher"),
];

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, region: Region, value: impl Into<String>) {
        self.inputs.insert(region, value.into());
    }

    pub fn attribute(&self, region: Region, name: &str) -> Option<&str> {
        self.attributes
            .get(&(region, name.to_string()))
            .map(String::as_str)
    }

    fn text(&self, region: Region) -> &str {
        self.texts.get(&region).map(String::as_str).unwrap_or_default()
    }

    /// Print the error region or the forecast, whichever is visible.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        if self.visible.contains(&Region::Error) {
            writeln!(out, "{}", self.text(Region::Error))?;
        }

        if self.visible.contains(&Region::Widget) {
            writeln!(out, "{}", self.text(Region::Location))?;
            writeln!(out, "{}", self.text(Region::WeatherDate))?;
            writeln!(
                out,
                "{} {}  {}",
                self.text(Region::Icon),
                self.text(Region::Condition),
                self.text(Region::Temperature)
            )?;
            for (region, label) in DETAIL_ROWS {
                writeln!(out, "  {label:<10}{}", self.text(*region))?;
            }
        }

        if self.visible.contains(&Region::WeekForecast) && !self.cards.is_empty() {
            writeln!(out)?;
            for card in &self.cards {
                let marker = if card.selected { '>' } else { ' ' };
                writeln!(
                    out,
                    "{marker} {:<5} {:<8} {} {:>5}  Pluie {:>4}  Vent {:>8}  Humidité {:>4}  Neige {}",
                    card.day_name,
                    card.short_date,
                    card.icon,
                    card.temperature,
                    card.rain,
                    card.wind,
                    card.humidity,
                    card.snow,
                )?;
            }
            if let Some(card) = self.cards.first() {
                writeln!(out, "\nRadar : {}", card.href)?;
            }
        }

        Ok(())
    }
}

impl View for TerminalView {
    fn value(&self, region: Region) -> Option<String> {
        self.inputs.get(&region).cloned()
    }

    fn set_text(&mut self, region: Region, text: &str) {
        self.texts.insert(region, text.to_string());
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if region == Region::Loading && visible {
            eprintln!("Chargement…");
        }
        if visible {
            self.visible.insert(region);
        } else {
            self.visible.remove(&region);
        }
    }

    fn set_attribute(&mut self, region: Region, name: &str, value: &str) {
        self.attributes
            .insert((region, name.to_string()), value.to_string());
    }

    fn set_cards(&mut self, region: Region, cards: Vec<DayCard>) {
        if region == Region::DaysGrid {
            self.cards = cards;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(view: &TerminalView) -> String {
        let mut out = Vec::new();
        view.print(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn inputs_are_only_present_when_set() {
        let mut view = TerminalView::new();
        assert_eq!(view.value(Region::PostalCode), None);
        view.set_input(Region::PostalCode, "75001");
        assert_eq!(view.value(Region::PostalCode).as_deref(), Some("75001"));
    }

    #[test]
    fn prints_only_visible_error() {
        let mut view = TerminalView::new();
        view.set_text(Region::Error, "⚠️ Veuillez sélectionner une date");
        assert_eq!(printed(&view), "");

        view.set_visible(Region::Error, true);
        assert_eq!(printed(&view), "⚠️ Veuillez sélectionner une date\n");
    }

    #[test]
    fn prints_forecast_and_marks_selected_card() {
        let mut view = TerminalView::new();
        view.set_text(Region::Location, "Paris (75001)");
        view.set_text(Region::Temperature, "9°C");
        view.set_text(Region::SnowProb, "NON");
        view.set_visible(Region::Widget, true);
        view.set_cards(
            Region::DaysGrid,
            vec![DayCard {
                day_name: "mar.".into(),
                short_date: "2 janv.".into(),
                icon: "🌧️".into(),
                temperature: "9°C".into(),
                rain: "60%".into(),
                wind: "15 km/h".into(),
                humidity: "80%".into(),
                snow: "NON".into(),
                href: "https://www.ventusky.com/?p=48.86;2.35;10&l=rain-3h".into(),
                title: String::new(),
                selected: true,
            }],
        );
        view.set_visible(Region::WeekForecast, true);

        let text = printed(&view);
        assert!(text.starts_with("Paris (75001)\n"));
        assert!(text.contains("Neige     NON"));
        assert!(text.contains("> mar."));
        assert!(text.contains("Radar : https://www.ventusky.com/?p=48.86;2.35;10&l=rain-3h"));
    }
}
