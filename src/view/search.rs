//! Client-side search over the registration snapshot
//!
//! Searching never goes to the store. The controller keeps a full snapshot of
//! every registration and filters it here by substring, either across all
//! searchable fields or within one selected field.
//!
//! Text fields are compared case-insensitively. The contact number is matched
//! as typed, since phone numbers have no case.

use crate::model::{ModelError, Registration};
use std::fmt;
use std::str::FromStr;

/// Field selector for searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchField {
    /// Any of the searchable fields
    #[default]
    All,
    Name,
    Email,
    Nickname,
    Contact,
    Church,
    Membership,
    Address,
}

impl SearchField {
    /// Every selector, in menu order
    pub const VARIANTS: [Self; 8] = [
        Self::All,
        Self::Name,
        Self::Email,
        Self::Nickname,
        Self::Contact,
        Self::Church,
        Self::Membership,
        Self::Address,
    ];

    /// Fields consulted by [`SearchField::All`]
    pub const SEARCHABLE: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Nickname,
        Self::Contact,
        Self::Church,
        Self::Membership,
        Self::Address,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Name => "name",
            Self::Email => "email",
            Self::Nickname => "nickname",
            Self::Contact => "contact",
            Self::Church => "church",
            Self::Membership => "membership",
            Self::Address => "address",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Fields",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Nickname => "Nickname",
            Self::Contact => "Contact",
            Self::Church => "Church",
            Self::Membership => "Membership",
            Self::Address => "Address",
        }
    }

    /// Value of this field on a registration (`None` for `All` or a missing email)
    #[must_use]
    pub fn value(self, reg: &Registration) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Name => Some(&reg.name),
            Self::Email => reg.email.as_deref(),
            Self::Nickname => Some(&reg.nickname),
            Self::Contact => Some(&reg.contact_number),
            Self::Church => Some(&reg.local_church),
            Self::Membership => Some(reg.membership.as_str()),
            Self::Address => Some(&reg.address),
        }
    }

    #[must_use]
    pub const fn is_case_sensitive(self) -> bool {
        matches!(self, Self::Contact)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SearchField {
    type Err = ModelError;

    /// Accepts the selector key (`name`) or the stored field key (`pangalan`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(field) = Self::VARIANTS.iter().find(|f| f.key().eq_ignore_ascii_case(s)) {
            return Ok(*field);
        }
        match s {
            "pangalan" => Ok(Self::Name),
            "palayaw" => Ok(Self::Nickname),
            "contactNumber" => Ok(Self::Contact),
            "localChurch" => Ok(Self::Church),
            "kasapian" => Ok(Self::Membership),
            "tirahan" => Ok(Self::Address),
            _ => Err(ModelError::UnknownSearchField(s.to_string())),
        }
    }
}

/// A non-blank search term bound to a field selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    folded: String,
    field: SearchField,
}

impl SearchQuery {
    /// Returns `None` for an empty or whitespace-only term
    #[must_use]
    pub fn new(term: &str, field: SearchField) -> Option<Self> {
        if term.trim().is_empty() {
            return None;
        }
        Some(Self {
            term: term.to_string(),
            folded: term.to_lowercase(),
            field,
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub const fn field(&self) -> SearchField {
        self.field
    }

    #[must_use]
    pub fn matches(&self, reg: &Registration) -> bool {
        match self.field {
            SearchField::All => SearchField::SEARCHABLE
                .iter()
                .any(|field| self.matches_field(*field, reg)),
            field => self.matches_field(field, reg),
        }
    }

    fn matches_field(&self, field: SearchField, reg: &Registration) -> bool {
        field.value(reg).is_some_and(|value| {
            if field.is_case_sensitive() {
                value.contains(&self.term)
            } else {
                value.to_lowercase().contains(&self.folded)
            }
        })
    }
}

/// Registrations matching `query`, in snapshot order
#[must_use]
pub fn filter(snapshot: &[Registration], query: &SearchQuery) -> Vec<Registration> {
    snapshot
        .iter()
        .filter(|reg| query.matches(reg))
        .cloned()
        .collect()
}

/// Search term, selector and results held by the list view
///
/// Results are `Some` exactly while a non-blank term is active.
#[derive(Debug, Clone)]
pub struct SearchState {
    term: String,
    field: SearchField,
    results: Option<Vec<Registration>>,
    page: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: String::new(),
            field: SearchField::All,
            results: None,
            page: 1,
        }
    }
}

impl SearchState {
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub const fn field(&self) -> SearchField {
        self.field
    }

    /// True while the view shows search results
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.results.is_some()
    }

    #[must_use]
    pub fn results(&self) -> Option<&[Registration]> {
        self.results.as_deref()
    }

    /// Current page within the results
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub const fn set_field(&mut self, field: SearchField) {
        self.field = field;
    }

    /// Run the current term against `snapshot` and go to results page 1
    ///
    /// A blank term leaves search mode.
    pub fn run(&mut self, snapshot: &[Registration]) {
        self.results = SearchQuery::new(&self.term, self.field).map(|q| filter(snapshot, &q));
        self.page = 1;
    }

    /// Re-run the active search after the snapshot changed, keeping the page
    /// when it is still in range
    pub fn rerun(&mut self, snapshot: &[Registration], page_size: usize) {
        if !self.is_active() {
            return;
        }
        let page = self.page;
        self.run(snapshot);
        let count = self.results.as_ref().map_or(0, Vec::len);
        let last = super::pagination::total_pages(count, page_size).max(1);
        self.page = page.min(last);
    }

    /// Drop the term and results
    pub fn clear(&mut self) {
        self.term.clear();
        self.results = None;
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Membership;
    use crate::testing::registration;

    fn snapshot() -> Vec<Registration> {
        let mut maria = registration("Maria Santos");
        maria.local_church = "Malolos".into();
        maria.contact_number = "09171234567".into();

        let mut jose = registration("Jose Rizal");
        jose.email = Some("jose@example.com".into());
        jose.address = "Calamba, Laguna".into();
        jose.membership = Membership::Professing;

        let mut ana = registration("Ana Reyes");
        ana.nickname = "Annie".into();
        ana.contact_number = "ABC-555".into();

        vec![maria, jose, ana]
    }

    fn found(query: &SearchQuery) -> Vec<String> {
        filter(&snapshot(), query).into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_all_fields_finds_name_case_insensitively() {
        let query = SearchQuery::new("maria", SearchField::All).unwrap();
        assert_eq!(found(&query), vec!["Maria Santos"]);
    }

    #[test]
    fn test_blank_term_is_not_a_query() {
        assert!(SearchQuery::new("", SearchField::All).is_none());
        assert!(SearchQuery::new("   \t", SearchField::Name).is_none());
    }

    #[test]
    fn test_single_field_restricts_matching() {
        let by_email = SearchQuery::new("JOSE@", SearchField::Email).unwrap();
        assert_eq!(found(&by_email), vec!["Jose Rizal"]);

        let by_church = SearchQuery::new("jose", SearchField::Church).unwrap();
        assert!(found(&by_church).is_empty());
    }

    #[test]
    fn test_contact_match_is_case_sensitive() {
        let exact = SearchQuery::new("ABC", SearchField::Contact).unwrap();
        assert_eq!(found(&exact), vec!["Ana Reyes"]);

        let folded = SearchQuery::new("abc", SearchField::Contact).unwrap();
        assert!(found(&folded).is_empty());

        let via_all = SearchQuery::new("1234", SearchField::All).unwrap();
        assert_eq!(found(&via_all), vec!["Maria Santos"]);
    }

    #[test]
    fn test_membership_and_address_are_searchable() {
        let query = SearchQuery::new("professing", SearchField::All).unwrap();
        assert_eq!(found(&query), vec!["Jose Rizal"]);

        let query = SearchQuery::new("laguna", SearchField::Address).unwrap();
        assert_eq!(found(&query), vec!["Jose Rizal"]);
    }

    #[test]
    fn test_missing_email_never_matches() {
        let query = SearchQuery::new("example", SearchField::Email).unwrap();
        assert_eq!(found(&query), vec!["Jose Rizal"]);
    }

    #[test]
    fn test_search_field_parse() {
        assert_eq!("all".parse::<SearchField>().unwrap(), SearchField::All);
        assert_eq!("Church".parse::<SearchField>().unwrap(), SearchField::Church);
        assert_eq!("contactNumber".parse::<SearchField>().unwrap(), SearchField::Contact);
        assert!("birthday".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_state_run_and_clear() {
        let snapshot = snapshot();
        let mut state = SearchState::default();

        state.set_term("an");
        state.run(&snapshot);
        assert!(state.is_active());
        assert_eq!(state.results().unwrap().len(), 2);

        state.set_field(SearchField::Nickname);
        state.run(&snapshot);
        assert_eq!(state.results().unwrap().len(), 1);

        state.set_term("  ");
        state.run(&snapshot);
        assert!(!state.is_active());

        state.set_term("x");
        state.run(&snapshot);
        state.clear();
        assert!(!state.is_active());
        assert_eq!(state.term(), "");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_rerun_keeps_page_in_range() {
        let snapshot: Vec<_> = (1..=12).map(|i| registration(&format!("Name {i:02}"))).collect();
        let mut state = SearchState::default();
        state.set_term("name");
        state.run(&snapshot);
        state.set_page(3);

        state.rerun(&snapshot[..9], 5);
        assert_eq!(state.page(), 2);
    }
}
