//! Panel result model.
//!
//! Every chart panel resolves to exactly one [`PanelState`]: a
//! placeholder (selection incomplete or no matching data), or a rendered
//! list of per-carrier items where failures appear inline next to their
//! surviving siblings. States are fully replaced on every transition;
//! nothing is merged or cached.

use crate::theme::ChartTemplate;
use ratatui::style::Color;

/// Non-error, non-data states communicating "nothing to show because of
/// selection state".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    SelectCarrier,
    SelectCountry,
    NoData,
}

impl Placeholder {
    pub fn heading(&self) -> &'static str {
        match self {
            Placeholder::SelectCarrier => "Select Carriers",
            Placeholder::SelectCountry => "Select Countries",
            Placeholder::NoData => "No Data Available",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Placeholder::SelectCarrier => {
                "Please select one or more energy carriers to view data."
            }
            Placeholder::SelectCountry => {
                "Please select at least one country when 'Select Countries' mode is active."
            }
            Placeholder::NoData => {
                "No data found for the current selection. Try adjusting your filters."
            }
        }
    }
}

/// One plotted series of an area or scatter figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

/// One bar of a bar figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub color: Color,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FigureBody {
    /// Stacked-over-time view: one value per snapshot per series.
    Area {
        snapshots: Vec<String>,
        series: Vec<Series>,
    },
    /// Single aggregate value per group.
    Bars(Vec<Bar>),
    /// Geographic topology view.
    Scatter(Vec<Series>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub title: String,
    pub template: ChartTemplate,
    pub body: FigureBody,
}

/// One entry of a rendered panel: a figure, or the inline error that
/// took its place.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelItem {
    Figure(Figure),
    Error { context: String, message: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PanelState {
    #[default]
    NotRendered,
    Placeholder(Placeholder),
    Rendered(Vec<PanelItem>),
}

impl PanelState {
    pub fn figure_count(&self) -> usize {
        match self {
            PanelState::Rendered(items) => items
                .iter()
                .filter(|i| matches!(i, PanelItem::Figure(_)))
                .count(),
            _ => 0,
        }
    }

    pub fn error_count(&self) -> usize {
        match self {
            PanelState::Rendered(items) => items
                .iter()
                .filter(|i| matches!(i, PanelItem::Error { .. }))
                .count(),
            _ => 0,
        }
    }

    pub fn partially_failed(&self) -> bool {
        self.error_count() > 0 && self.figure_count() > 0
    }

    pub fn fully_failed(&self) -> bool {
        self.error_count() > 0 && self.figure_count() == 0
    }
}

/// The metadata panel is a distinct failure class: a serialization
/// problem must read differently from a chart error.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MetadataPanel {
    #[default]
    NotRendered,
    Text(String),
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> PanelItem {
        PanelItem::Figure(Figure {
            title: "t".into(),
            template: ChartTemplate::light(),
            body: FigureBody::Bars(Vec::new()),
        })
    }

    fn error() -> PanelItem {
        PanelItem::Error {
            context: "carrier 'gas'".into(),
            message: "boom".into(),
        }
    }

    #[test]
    fn failure_classification() {
        let ok = PanelState::Rendered(vec![figure(), figure()]);
        assert!(!ok.partially_failed() && !ok.fully_failed());

        let partial = PanelState::Rendered(vec![figure(), error()]);
        assert!(partial.partially_failed() && !partial.fully_failed());

        let failed = PanelState::Rendered(vec![error()]);
        assert!(failed.fully_failed() && !failed.partially_failed());

        assert!(!PanelState::Placeholder(Placeholder::NoData).fully_failed());
    }
}
