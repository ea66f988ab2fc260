use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;

use super::ApiConfig;
use crate::error::ApiError;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Delete,
    Get,
    Patch,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// Description of one API operation.
///
/// Scheme, host and token default to the values in [`ApiConfig`]; an endpoint
/// only overrides them when it talks to a different service.
pub trait Endpoint {
    fn scheme<'a>(&'a self, config: &'a ApiConfig) -> &'a str {
        &config.scheme
    }

    fn host<'a>(&'a self, config: &'a ApiConfig) -> &'a str {
        &config.host
    }

    fn token<'a>(&'a self, config: &'a ApiConfig) -> &'a str {
        &config.access_token
    }

    fn path(&self) -> String;

    fn method(&self) -> HttpMethod;

    fn query_items(&self) -> Option<Vec<(String, String)>>;

    fn body(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        None
    }

    fn url(&self, config: &ApiConfig) -> Result<Url, ApiError> {
        let raw = format!(
            "{}://{}{}",
            self.scheme(config),
            self.host(config),
            self.path()
        );
        let mut url = Url::parse(&raw).map_err(|_| ApiError::url())?;
        if url.cannot_be_a_base() {
            return Err(ApiError::url());
        }
        if let Some(items) = self.query_items().filter(|items| !items.is_empty()) {
            url.query_pairs_mut().extend_pairs(items);
        }
        Ok(url)
    }

    fn to_request(
        &self,
        http: &reqwest::Client,
        config: &ApiConfig,
    ) -> Result<reqwest::Request, ApiError> {
        let url = self.url(config)?;
        let mut builder = http
            .request(self.method().into(), url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(AUTHORIZATION, format!("Bearer {}", self.token(config)));

        if let Some(body) = self.body() {
            let bytes = serde_json::to_vec(&body).map_err(|_| ApiError::body_encoding())?;
            builder = builder.body(bytes);
        }

        builder.build().map_err(|_| ApiError::url())
    }
}

pub trait QueryParams: Serialize {
    fn to_query_items(&self) -> Option<Vec<(String, String)>> {
        let value = serde_json::to_value(self).ok()?;
        let object = value.as_object()?;
        let mut items: Vec<(String, String)> = object
            .iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    serde_json::Value::Null => return None,
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((name.clone(), value))
            })
            .collect();
        items.sort();
        Some(items)
    }
}

impl<T: Serialize> QueryParams for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        host: Option<String>,
        path: String,
        method: HttpMethod,
        query: Option<Vec<(String, String)>>,
        body: Option<serde_json::Map<String, serde_json::Value>>,
    }

    impl Probe {
        fn get(path: &str) -> Self {
            Self {
                host: None,
                path: path.to_string(),
                method: HttpMethod::Get,
                query: None,
                body: None,
            }
        }
    }

    impl Endpoint for Probe {
        fn host<'a>(&'a self, config: &'a ApiConfig) -> &'a str {
            self.host.as_deref().unwrap_or(&config.host)
        }

        fn path(&self) -> String {
            self.path.clone()
        }

        fn method(&self) -> HttpMethod {
            self.method
        }

        fn query_items(&self) -> Option<Vec<(String, String)>> {
            self.query.clone()
        }

        fn body(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
            self.body.clone()
        }
    }

    fn config() -> ApiConfig {
        ApiConfig {
            access_token: String::from("secret"),
            ..Default::default()
        }
    }

    #[test]
    fn builds_url_from_parts() {
        let mut endpoint = Probe::get("/3/movie/popular");
        endpoint.query = Some(vec![
            (String::from("language"), String::from("en-US")),
            (String::from("page"), String::from("2")),
        ]);
        let url = endpoint.url(&config()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?language=en-US&page=2"
        );
    }

    #[test]
    fn empty_query_adds_no_question_mark() {
        let mut endpoint = Probe::get("/3/genre/movie/list");
        endpoint.query = Some(Vec::new());
        let url = endpoint.url(&config()).unwrap();
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/genre/movie/list");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let mut endpoint = Probe::get("/3/search/movie");
        endpoint.query = Some(vec![(String::from("query"), String::from("star wars"))]);
        let url = endpoint.url(&config()).unwrap();
        assert_eq!(url.query(), Some("query=star+wars"));
    }

    #[test]
    fn invalid_host_maps_to_url_error() {
        let mut endpoint = Probe::get("/3/movie/popular");
        endpoint.host = Some(String::from("bad host"));
        assert_eq!(endpoint.url(&config()).unwrap_err(), ApiError::url());
    }

    #[test]
    fn request_carries_json_and_bearer_headers() {
        let endpoint = Probe::get("/3/movie/550");
        let request = endpoint
            .to_request(&reqwest::Client::new(), &config())
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        let headers = request.headers();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert!(request.body().is_none());
    }

    #[test]
    fn body_is_serialized_as_json() {
        let mut endpoint = Probe::get("/3/movie/550/rating");
        endpoint.method = HttpMethod::Post;
        let mut body = serde_json::Map::new();
        body.insert(String::from("value"), serde_json::json!(8.5));
        endpoint.body = Some(body);

        let request = endpoint
            .to_request(&reqwest::Client::new(), &config())
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(bytes, br#"{"value":8.5}"#);
    }

    #[test]
    fn method_strings_match_http_verbs() {
        let verbs: Vec<&str> = [
            HttpMethod::Delete,
            HttpMethod::Get,
            HttpMethod::Patch,
            HttpMethod::Post,
            HttpMethod::Put,
        ]
        .iter()
        .map(HttpMethod::as_str)
        .collect();
        assert_eq!(verbs, ["DELETE", "GET", "PATCH", "POST", "PUT"]);
    }

    #[test]
    fn params_become_sorted_query_items() {
        #[derive(Serialize)]
        struct Params {
            page: u32,
            language: String,
            region: Option<String>,
        }

        let items = Params {
            page: 3,
            language: String::from("en-US"),
            region: None,
        }
        .to_query_items()
        .unwrap();

        assert_eq!(
            items,
            vec![
                (String::from("language"), String::from("en-US")),
                (String::from("page"), String::from("3")),
            ]
        );
    }
}
