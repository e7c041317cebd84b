use crate::error::Result;
use crate::model::Sound;
use crate::query::{Paging, PagingQuery, Parameters, Payload, Query, SortOrder, json_results};
use crate::response::{PagingResponse, Response};

/// Free-text search over sound names, tags and descriptions
/// (`/search/text/`).
///
/// ```
/// use freesound::{SortOrder, TextSearch};
///
/// let search = TextSearch::new("cars")
///     .with_sort_order(SortOrder::CreatedAscending)
///     .with_group_by_pack(true)
///     .with_page_size(50);
/// assert_eq!(search.search_string(), Some("cars"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextSearch {
    search_string: Option<String>,
    sort_order: Option<SortOrder>,
    group_by_pack: Option<bool>,
    filter: Option<String>,
    fields: Vec<String>,
    paging: Paging,
    response: Option<Response<PagingResponse<Sound>>>,
}

impl TextSearch {
    pub fn new(search_string: impl Into<String>) -> Self {
        Self::default().with_search_string(search_string)
    }

    pub fn with_search_string(mut self, search_string: impl Into<String>) -> Self {
        self.search_string = Some(search_string.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Collapse results from the same pack into a single entry.
    pub fn with_group_by_pack(mut self, group_by_pack: bool) -> Self {
        self.group_by_pack = Some(group_by_pack);
        self
    }

    /// Solr-style filter, e.g. `duration:[1.0 TO 5.0] type:wav`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Restrict the sound fields included in each result.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.paging.set_page(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.paging.set_page_size(page_size);
        self
    }

    pub fn search_string(&self) -> Option<&str> {
        self.search_string.as_deref()
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    pub fn group_by_pack(&self) -> Option<bool> {
        self.group_by_pack
    }
}

impl Query for TextSearch {
    type Results = PagingResponse<Sound>;

    const PATH: &'static str = "/search/text/";

    fn query_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        if let Some(query) = &self.search_string {
            params.insert("query".into(), query.clone());
        }
        if let Some(sort) = self.sort_order {
            params.insert("sort".into(), sort.parameter_value().into());
        }
        if let Some(group) = self.group_by_pack {
            params.insert("group_by_pack".into(), if group { "1" } else { "0" }.into());
        }
        if let Some(filter) = &self.filter {
            params.insert("filter".into(), filter.clone());
        }
        if !self.fields.is_empty() {
            params.insert("fields".into(), self.fields.join(","));
        }
        self.paging.write_parameters(&mut params);
        params
    }

    fn process_results(&self, payload: Payload) -> Result<Self::Results> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<Self::Results>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<Self::Results>> {
        &mut self.response
    }
}

impl PagingQuery<Sound> for TextSearch {
    fn paging(&self) -> &Paging {
        &self.paging
    }

    fn paging_mut(&mut self) -> &mut Paging {
        &mut self.paging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_populates_fields() {
        let search = TextSearch::default()
            .with_search_string("cars")
            .with_sort_order(SortOrder::CreatedAscending)
            .with_group_by_pack(true);

        assert_eq!(search.search_string(), Some("cars"));
        assert_eq!(search.sort_order(), Some(SortOrder::CreatedAscending));
        assert_eq!(search.group_by_pack(), Some(true));
    }

    #[test]
    fn query_parameters_use_api_names() {
        let params = TextSearch::new("cars")
            .with_sort_order(SortOrder::CreatedAscending)
            .with_group_by_pack(true)
            .with_filter("type:wav")
            .with_fields(["id", "name"])
            .with_page_size(20)
            .query_parameters();

        assert_eq!(params["query"], "cars");
        assert_eq!(params["sort"], "created_asc");
        assert_eq!(params["group_by_pack"], "1");
        assert_eq!(params["filter"], "type:wav");
        assert_eq!(params["fields"], "id,name");
        assert_eq!(params["page"], "1");
        assert_eq!(params["page_size"], "20");
    }

    #[test]
    fn unset_options_are_omitted() {
        let params = TextSearch::new("rain").with_group_by_pack(false).query_parameters();

        assert_eq!(params["group_by_pack"], "0");
        assert!(!params.contains_key("sort"));
        assert!(!params.contains_key("filter"));
        assert!(!params.contains_key("fields"));
        assert!(TextSearch::new("rain").route_parameters().is_empty());
    }

    #[test]
    fn first_page_has_no_previous() {
        let search = TextSearch::new("rain");
        assert!(!search.has_previous_page());
        assert!(!search.has_next_page());
        assert!(TextSearch::new("rain").with_page(3).has_previous_page());
    }
}
