//! Pagination follower for list endpoints.
//!
//! List endpoints answer `{"items": [...]}` and advertise the following page
//! through an RFC 5988 `Link` header with `rel="next"`. The next URL already
//! carries the full query string, so following it means re-issuing the
//! original request with a different path.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api_child::{decode_json, ApiCall};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::transport::Transport;

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// URL of the following page, if any.
    pub next: Option<String>,
}

#[derive(Deserialize)]
struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Decode a list body plus its `Link` header.
pub fn decode_page<T: DeserializeOwned>(response: &HttpResponse) -> Result<Page<T>, ApiError> {
    let envelope: ItemsEnvelope<T> = decode_json(response)?;
    Ok(Page {
        items: envelope.items,
        next: next_link(&response.headers),
    })
}

/// Decode a list body that is never paginated.
pub fn decode_items<T: DeserializeOwned>(response: &HttpResponse) -> Result<Vec<T>, ApiError> {
    decode_json::<ItemsEnvelope<T>>(response).map(|envelope| envelope.items)
}

/// Split a `Link` header value into its link-values. Commas inside a
/// `<...>` target or a quoted parameter do not separate links.
fn split_links(value: &str) -> Vec<&str> {
    let mut links = Vec::new();
    let mut start = 0;
    let mut in_target = false;
    let mut in_quotes = false;
    for (i, c) in value.char_indices() {
        match c {
            '<' if !in_quotes => in_target = true,
            '>' if !in_quotes => in_target = false,
            '"' if !in_target => in_quotes = !in_quotes,
            ',' if !in_target && !in_quotes => {
                links.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    links.push(&value[start..]);
    links
}

/// Extract the `rel="next"` target from `Link` headers.
pub fn next_link(headers: &[(String, String)]) -> Option<String> {
    headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("link"))
        .flat_map(|(_, v)| split_links(v))
        .find_map(|link| {
            let rest = link.trim().strip_prefix('<')?;
            let end = rest.find('>')?;
            let (target, params) = (&rest[..end], &rest[end + 1..]);
            let is_next = params.split(';').any(|param| {
                let mut kv = param.splitn(2, '=');
                let key = kv.next().unwrap_or("").trim();
                let value = kv.next().unwrap_or("").trim().trim_matches('"');
                key.eq_ignore_ascii_case("rel")
                    && value.split_whitespace().any(|rel| rel.eq_ignore_ascii_case("next"))
            });
            is_next.then(|| target.to_string())
        })
}

impl<T: DeserializeOwned> ApiCall<Page<T>> {
    /// Iterate over the items of every page, fetching pages on demand.
    pub fn follow<'t, Tr: Transport + ?Sized>(&self, transport: &'t Tr) -> PageIter<'t, T, Tr> {
        PageIter {
            call: self.clone(),
            transport,
            buffer: Vec::new().into_iter(),
            state: FollowState::Start,
        }
    }

    /// Fetch every page and return all items.
    pub fn collect_all<Tr: Transport + ?Sized>(&self, transport: &Tr) -> Result<Vec<T>, ApiError> {
        self.follow(transport).collect()
    }
}

enum FollowState {
    Start,
    Next(String),
    Done,
}

/// Iterator returned by [`ApiCall::follow`].
pub struct PageIter<'t, T, Tr: ?Sized> {
    call: ApiCall<Page<T>>,
    transport: &'t Tr,
    buffer: std::vec::IntoIter<T>,
    state: FollowState,
}

impl<T: DeserializeOwned, Tr: Transport + ?Sized> Iterator for PageIter<'_, T, Tr> {
    type Item = Result<T, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            let request = match std::mem::replace(&mut self.state, FollowState::Done) {
                FollowState::Done => return None,
                FollowState::Start => self.call.request.clone(),
                FollowState::Next(url) => {
                    if let Err(e) = url::Url::parse(&url) {
                        tracing::warn!(url = %url, "unusable next link");
                        return Some(Err(ApiError::InvalidUrl(format!("{url}: {e}"))));
                    }
                    tracing::debug!(url = %url, "following next page");
                    self.call.request.with_path(url)
                }
            };
            let page = match self
                .transport
                .execute(&request)
                .and_then(|response| self.call.parse(response))
            {
                Ok(page) => page,
                Err(e) => return Some(Err(e)),
            };
            if let Some(next) = page.next {
                self.state = FollowState::Next(next);
            }
            self.buffer = page.items.into_iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_child::{ApiSession, QueryParams};
    use crate::config::ClientConfig;
    use crate::http::{HttpMethod, HttpRequest};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    fn link(value: &str) -> Vec<(String, String)> {
        vec![("Link".to_string(), value.to_string())]
    }

    #[test]
    fn next_link_single() {
        let headers = link(r#"<https://webexapis.com/v1/people?cursor=abc>; rel="next""#);
        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://webexapis.com/v1/people?cursor=abc")
        );
    }

    #[test]
    fn next_link_among_several() {
        let headers = link(
            r#"<https://h/a?start=0>; rel="prev", <https://h/a?start=20>;rel=next"#,
        );
        assert_eq!(next_link(&headers).as_deref(), Some("https://h/a?start=20"));
    }

    #[test]
    fn next_link_keeps_commas_inside_target() {
        let headers = link(r#"<https://webexapis.com/v1/people?id=a,b&start=2>; rel="next""#);
        assert_eq!(
            next_link(&headers).as_deref(),
            Some("https://webexapis.com/v1/people?id=a,b&start=2")
        );

        let headers = link(r#"<https://h/a?id=x,y>; rel="prev"; title="a, b", <https://h/a?id=x,y&start=20>; rel=next"#);
        assert_eq!(next_link(&headers).as_deref(), Some("https://h/a?id=x,y&start=20"));
    }

    #[test]
    fn next_link_absent() {
        assert!(next_link(&link(r#"<https://h/a>; rel="first""#)).is_none());
        assert!(next_link(&[]).is_none());
    }

    /// Replays canned responses and records requested URLs.
    struct Replay {
        responses: RefCell<VecDeque<HttpResponse>>,
        seen: RefCell<Vec<String>>,
    }

    impl Transport for Replay {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.path.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no more responses".to_string()))
        }
    }

    fn page(body: &str, next: Option<&str>) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: next
                .map(|n| link(&format!("<{n}>; rel=\"next\"")))
                .unwrap_or_default(),
            body: body.to_string(),
        }
    }

    fn list_call() -> ApiCall<Page<String>> {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        session.call(
            HttpMethod::Get,
            "http://h/items",
            &QueryParams::new(),
            None,
            decode_page::<String>,
        )
    }

    #[test]
    fn follows_until_no_next_link() {
        let transport = Replay {
            responses: RefCell::new(VecDeque::from(vec![
                page(r#"{"items":["a","b"]}"#, Some("http://h/items?start=2")),
                page(r#"{"items":[]}"#, Some("http://h/items?start=2&x=1")),
                page(r#"{"items":["c"]}"#, None),
            ])),
            seen: RefCell::new(Vec::new()),
        };
        let items = list_call().collect_all(&transport).unwrap();
        assert_eq!(items, vec!["a", "b", "c"]);
        assert_eq!(
            *transport.seen.borrow(),
            vec![
                "http://h/items".to_string(),
                "http://h/items?start=2".to_string(),
                "http://h/items?start=2&x=1".to_string(),
            ]
        );
    }

    #[test]
    fn stops_after_error() {
        let transport = Replay {
            responses: RefCell::new(VecDeque::from(vec![
                page(r#"{"items":["a"]}"#, Some("http://h/items?start=1")),
                HttpResponse {
                    status: 500,
                    headers: Vec::new(),
                    body: "boom".to_string(),
                },
            ])),
            seen: RefCell::new(Vec::new()),
        };
        let call = list_call();
        let mut iter = call.follow(&transport);
        assert_eq!(iter.next().unwrap().unwrap(), "a");
        assert!(matches!(
            iter.next().unwrap().unwrap_err(),
            ApiError::HttpError { status: 500, .. }
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn relative_next_link_is_invalid_url() {
        let transport = Replay {
            responses: RefCell::new(VecDeque::from(vec![page(
                r#"{"items":["a"]}"#,
                Some("/items?start=1"),
            )])),
            seen: RefCell::new(Vec::new()),
        };
        let results: Vec<_> = list_call().follow(&transport).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[1], Err(ApiError::InvalidUrl(_))));
        assert_eq!(transport.seen.borrow().len(), 1);
    }

    #[test]
    fn missing_items_is_empty_page() {
        let page: Page<String> = decode_page(&page("{}", None)).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
    }
}
