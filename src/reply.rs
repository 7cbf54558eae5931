use crate::error::{Error, Result};

const SCHEME_PREFIX: &str = "https://";

/// Smallest album that gets a reply.
pub const MIN_MEDIA: usize = 2;

/// Build the reply for one post's media URLs.
///
/// Returns `Ok(None)` for fewer than [`MIN_MEDIA`] URLs. Only the first URL loses its
/// `https://` prefix; the rest are passed through untouched.
///
/// # Errors
///
/// Returns `Error::MalformedUrl` if the first URL is shorter than the prefix.
pub fn format_reply(urls: &[String]) -> Result<Option<String>> {
    if urls.len() < MIN_MEDIA {
        return Ok(None);
    }
    let (first, rest) = (&urls[0], &urls[1..]);
    if first.len() < SCHEME_PREFIX.len() {
        return Err(Error::MalformedUrl(first.clone()));
    }

    let first = first.strip_prefix(SCHEME_PREFIX).unwrap_or(first);
    let mut reply = String::with_capacity(urls.iter().map(|u| u.len() + 1).sum());
    reply.push_str(first);
    for url in rest {
        reply.push(' ');
        reply.push_str(url);
    }
    Ok(Some(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn strips_only_first_scheme() {
        let reply = format_reply(&urls(&[
            "https://pbin.example/a.jpg",
            "https://pbin.example/b.jpg",
        ]))
        .unwrap();
        assert_eq!(
            reply.as_deref(),
            Some("pbin.example/a.jpg https://pbin.example/b.jpg")
        );
    }

    #[test]
    fn too_few_media() {
        assert_eq!(format_reply(&[]).unwrap(), None);
        assert_eq!(
            format_reply(&urls(&["https://pbin.example/a.jpg"])).unwrap(),
            None
        );
    }

    #[test]
    fn short_first_url() {
        let err = format_reply(&urls(&["a", "https://pbin.example/b.jpg"])).unwrap_err();
        assert!(matches!(err, Error::MalformedUrl(url) if url == "a"));
    }

    #[test]
    fn token_count_matches() {
        let input = urls(&[
            "https://pbin.example/1.jpg",
            "https://pbin.example/2.jpg",
            "http://pbin.example/3.jpg",
            "https://pbin.example/4.jpg",
        ]);
        let reply = format_reply(&input).unwrap().unwrap();
        let tokens = reply.split(' ').collect::<Vec<_>>();
        assert_eq!(tokens.len(), input.len());
        assert_eq!(tokens[0], "pbin.example/1.jpg");
        assert_eq!(tokens[1..], input[1..]);
    }

    #[test]
    fn first_without_scheme_kept() {
        let reply = format_reply(&urls(&["http://pbin.example/a.jpg", "https://b"])).unwrap();
        assert_eq!(reply.as_deref(), Some("http://pbin.example/a.jpg https://b"));
    }
}
