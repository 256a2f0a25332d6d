/// Common list-endpoint parameters. Each value is percent-encoded
/// independently when the query string is built.
#[derive(Debug, Default, Clone)]
pub struct ListParams {
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub expand: Option<String>,
    pub fields: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListParams {
    /// Render as `?k=v&...`, or an empty string when no parameter is set.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(filter) = &self.filter {
            params.push(format!("filter={}", encode(filter)));
        }
        if let Some(sort) = &self.sort {
            params.push(format!("sort={}", encode(sort)));
        }
        if let Some(expand) = &self.expand {
            params.push(format!("expand={}", encode(expand)));
        }
        if let Some(fields) = &self.fields {
            params.push(format!("fields={}", encode(fields)));
        }
        if let Some(page) = self.page {
            params.push(format!("page={page}"));
        }
        if let Some(per_page) = self.per_page {
            params.push(format!("perPage={per_page}"));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Percent-encode a single query parameter value.
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
