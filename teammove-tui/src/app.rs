use std::sync::Arc;

use teammove_core::{
    locality::Locality,
    model::{EventMeta, MatchRecord, RideStats},
    service::TeammoveService,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    EventSelect,
    PassengerAddress,
    MatchList,
}

pub(crate) struct App {
    pub service: Arc<TeammoveService>,

    pub screen: Screen,
    pub events: Vec<EventMeta>,
    pub event_list_index: usize,
    pub selected_event: Option<EventMeta>,

    pub address_input: String,
    pub passenger_locality: Locality,

    pub matches: Vec<MatchRecord>,
    pub match_list_index: usize,
    pub stats: Option<RideStats>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<TeammoveService>) -> Self {
        Self {
            service,
            screen: Screen::EventSelect,
            events: Vec::new(),
            event_list_index: 0,
            selected_event: None,
            address_input: String::new(),
            passenger_locality: Locality::default(),
            matches: Vec::new(),
            match_list_index: 0,
            stats: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) async fn refresh_events(&mut self) {
        match self.service.events().await {
            Ok(events) => {
                self.events = events;
                self.event_list_index = 0;
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not load events");
                self.error_message = Some(format!("Failed to load events: {err}"));
            }
        }
    }

    pub(crate) fn select_current_event(&mut self) {
        if let Some(event) = self.events.get(self.event_list_index) {
            self.selected_event = Some(event.clone());
            self.matches.clear();
            self.stats = None;
            self.screen = Screen::PassengerAddress;
        }
    }

    /// Re-extract the locality preview after the address was edited.
    pub(crate) fn address_changed(&mut self) {
        self.passenger_locality = TeammoveService::passenger_locality(&self.address_input);
    }

    pub(crate) fn show_matches(&mut self, matches: Vec<MatchRecord>, stats: RideStats) {
        self.matches = matches;
        self.match_list_index = 0;
        self.stats = Some(stats);
        self.screen = Screen::MatchList;
    }
}
