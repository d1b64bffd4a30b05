use crate::{MenuMap, YearMonth};

/// Handle for one in-flight menu fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    month: YearMonth,
}

impl FetchTicket {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Generation counter: only the most recently issued ticket is current
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchGuard {
    generation: u64,
}

impl FetchGuard {
    pub fn issue(&mut self, month: YearMonth) -> FetchTicket {
        self.generation += 1;

        FetchTicket {
            generation: self.generation,
            month,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }
}

/// Menu data of the displayed month, replaced wholesale when a fetch lands.
///
/// A response whose ticket has been superseded by a later navigation is
/// dropped instead of overwriting the newer month.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    month: YearMonth,
    menus: MenuMap,
    loading: bool,
    guard: FetchGuard,
}

impl MenuState {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            menus: MenuMap::new(),
            loading: false,
            guard: FetchGuard::default(),
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn menus(&self) -> &MenuMap {
        &self.menus
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switches to `month`, discards the old data and issues the ticket the
    /// caller must present with the fetched data.
    pub fn navigate(&mut self, month: YearMonth) -> FetchTicket {
        self.month = month;
        self.menus = MenuMap::new();
        self.loading = true;

        self.guard.issue(month)
    }

    /// Applies fetched data. Returns `false` when the ticket is stale.
    pub fn apply(&mut self, ticket: FetchTicket, menus: MenuMap) -> bool {
        if !self.guard.is_current(&ticket) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.guard.generation,
                month = %ticket.month.period(),
                "Discarding stale menu fetch"
            );
            return false;
        }

        self.menus = menus;
        self.loading = false;

        true
    }

    /// Marks the current fetch as finished without data
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        if !self.guard.is_current(&ticket) {
            return false;
        }

        self.loading = false;

        true
    }
}
