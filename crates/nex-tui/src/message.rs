//! All state transitions enter through one message enum.

use nex_core::ComponentClass;

use crate::models::CountryMode;

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// Leave the landing screen for the dashboard.
    EnterDashboard,
    /// Activate the network with this registry label.
    SwitchNetwork(String),
    /// Cycle to the next registered network.
    NextNetwork,
    /// Flip one carrier in or out of the selection.
    ToggleCarrier(String),
    /// Replace the carrier selection wholesale.
    SetCarriers(Vec<String>),
    SetCountryMode(CountryMode),
    ToggleCountryMode,
    ToggleCountry(String),
    SetCountries(Vec<String>),
    SwitchTab(crate::models::TabId),
    ToggleDarkMode,
    OpenExplorer(ComponentClass),
    CloseExplorer,
    /// Select a specific time-series attribute in the open explorer.
    SelectSeriesAttr(String),
    NextSeriesAttr,
    PrevSeriesAttr,
    /// Move keyboard focus between the filter checklists.
    FocusNext,
    CursorUp,
    CursorDown,
    /// Toggle the checklist entry under the cursor.
    ToggleSelected,
    ScrollUp,
    ScrollDown,
    Resize(u16, u16),
    Quit,
}
