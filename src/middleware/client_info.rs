use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header::USER_AGENT, request::Parts, HeaderMap},
};
use std::{convert::Infallible, net::SocketAddr};

use crate::types::{ClientInfo, UNKNOWN};

/// Resolve caller details from proxy headers, falling back to the socket peer.
///
/// Order: first `X-Forwarded-For` hop, `X-Real-IP`, then `peer`.
pub fn client_info_from(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClientInfo {
    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let ip = forwarded
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let user_agent = header_str(headers, USER_AGENT.as_str())
        .unwrap_or(UNKNOWN)
        .to_string();

    ClientInfo { ip, user_agent }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when served with `into_make_service_with_connect_info`
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(client_info_from(&parts.headers, peer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_defaults_to_unknown() {
        let info = client_info_from(&HeaderMap::new(), None);
        assert_eq!(info, ClientInfo::default());
        assert_eq!(info.ip, "unknown");
        assert_eq!(info.user_agent, "unknown");
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let info = client_info_from(
            &headers(&[
                ("x-forwarded-for", "203.0.113.9, 10.0.0.1"),
                ("x-real-ip", "10.0.0.2"),
                ("user-agent", "Mozilla/5.0"),
            ]),
            Some("127.0.0.1:4000".parse().unwrap()),
        );
        assert_eq!(info.ip, "203.0.113.9");
        assert_eq!(info.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_real_ip_then_peer() {
        let info = client_info_from(&headers(&[("x-real-ip", "10.0.0.2")]), None);
        assert_eq!(info.ip, "10.0.0.2");

        let info = client_info_from(&HeaderMap::new(), Some("192.0.2.1:5555".parse().unwrap()));
        assert_eq!(info.ip, "192.0.2.1");
    }
}
