use crate::config::Partner;
use crate::errors::DiscoveryError;
use log::debug;

pub const ENDPOINT_LISTING_PATH: &str = "/api/v1/endpoints";

const JENA_PATH: &str = "/api/v1/jena";

// Some instances list their endpoints with a bogus port and without the API version,
// e.g. `https://host:None/api/jena/ds/sparql`. Replaced in this order.
const MALFORMED_JENA_PATHS: [&str; 2] = [":None/api/jena", ":443/api/jena"];

/// Rewrites the malformed endpoint paths some partner instances report to `/api/v1/jena`.
pub fn rectify_endpoints(listing: &str) -> String {
    MALFORMED_JENA_PATHS
        .iter()
        .fold(listing.to_string(), |rectified, malformed| {
            rectified.replace(malformed, JENA_PATH)
        })
}

/// Parses the body of an endpoint listing, a JSON array of endpoint URLs.
///
/// Instances that render the listing as a Python list, `['https://...', '...']`, are accepted
/// too. When neither form fits, the JSON error is returned.
pub fn parse_endpoint_listing(listing: &str) -> Result<Vec<String>, serde_json::Error> {
    let rectified = rectify_endpoints(listing);
    serde_json::from_str(&rectified).or_else(|e| parse_quoted_string_list(&rectified).ok_or(e))
}

/// Flat list of single or double quoted strings with backslash escapes.
fn parse_quoted_string_list(listing: &str) -> Option<Vec<String>> {
    let inner = listing.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = vec![];
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let quote = match chars.next() {
            None => return Some(items),
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return None,
        };
        let mut item = String::new();
        loop {
            match chars.next()? {
                '\\' => match chars.next()? {
                    'n' => item.push('\n'),
                    't' => item.push('\t'),
                    escaped => item.push(escaped),
                },
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => return Some(items),
            Some(',') => {}
            Some(_) => return None,
        }
    }
}

pub async fn discover_endpoints(
    client: &reqwest::Client,
    partner: &Partner,
) -> Result<Vec<String>, DiscoveryError> {
    let url = partner.endpoint_listing_url();
    debug!("Listing endpoints of partner {} at {}", partner.name, url);
    let response = client
        .get(&url)
        .bearer_auth(&partner.token)
        .send()
        .await
        .map_err(|source| DiscoveryError::RequestError {
            partner: partner.name.clone(),
            url: url.clone(),
            source,
        })?;
    if !response.status().is_success() {
        return Err(DiscoveryError::BadStatusCode {
            partner: partner.name.clone(),
            url,
            status: response.status().to_string(),
        });
    }
    let listing = response
        .text()
        .await
        .map_err(|source| DiscoveryError::RequestError {
            partner: partner.name.clone(),
            url: url.clone(),
            source,
        })?;
    debug!("Endpoint listing of partner {}: {}", partner.name, listing);
    parse_endpoint_listing(&listing).map_err(|source| DiscoveryError::ParseError {
        partner: partner.name.clone(),
        url,
        source,
    })
}
