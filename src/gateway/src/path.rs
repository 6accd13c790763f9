use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::Error;
use pathd_proto::pathd as proto;

/// A route mutation as handed to the engine. The origin is always the
/// resolved transport peer of the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub prefix: IpNet,
    pub next_hop: Option<IpAddr>,
    pub origin: IpAddr,
}

impl Path {
    /// Builds a path from an inbound route descriptor. Any origin value
    /// carried in the payload is never read; only the given peer address
    /// becomes the origin.
    pub fn from_route(route: &proto::Route, origin: IpAddr) -> Result<Self, Error> {
        let prefix = route
            .prefix
            .parse()
            .map_err(|_| Error::InvalidPrefix(route.prefix.clone()))?;
        let next_hop = if route.next_hop.is_empty() {
            None
        } else {
            Some(
                route
                    .next_hop
                    .parse()
                    .map_err(|_| Error::InvalidNextHop(route.next_hop.clone()))?,
            )
        };
        Ok(Self {
            prefix,
            next_hop,
            origin,
        })
    }
}

impl From<&Path> for proto::Path {
    fn from(path: &Path) -> Self {
        Self {
            prefix: path.prefix.to_string(),
            next_hop: path
                .next_hop
                .map(|n| n.to_string())
                .unwrap_or_default(),
            origin: path.origin.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Path;
    use crate::error::Error;
    use pathd_proto::pathd as proto;
    use rstest::rstest;
    use std::net::IpAddr;

    fn route(prefix: &str, next_hop: &str, origin: &str) -> proto::Route {
        proto::Route {
            prefix: prefix.to_string(),
            next_hop: next_hop.to_string(),
            origin: origin.to_string(),
        }
    }

    #[rstest(
        input,
        peer,
        expected_next_hop,
        case(route("10.0.0.0/24", "9.9.9.9", ""), "203.0.113.5", Some("9.9.9.9")),
        case(route("10.0.0.0/24", "", ""), "203.0.113.5", None),
        case(route("2001:db8::/32", "2001:db8::1", ""), "2001:db8::ff", Some("2001:db8::1")),
    )]
    fn works_path_from_route(input: proto::Route, peer: &str, expected_next_hop: Option<&str>) {
        let peer: IpAddr = peer.parse().unwrap();
        let path = Path::from_route(&input, peer).unwrap();
        assert_eq!(path.prefix, input.prefix.parse().unwrap());
        assert_eq!(path.origin, peer);
        assert_eq!(
            path.next_hop,
            expected_next_hop.map(|n| n.parse().unwrap())
        );
    }

    // The payload may carry an origin but it must never become the path's
    // origin.
    #[test]
    fn works_payload_origin_is_ignored() {
        let peer: IpAddr = "203.0.113.5".parse().unwrap();
        let path = Path::from_route(&route("10.0.0.0/24", "9.9.9.9", "9.9.9.9"), peer).unwrap();
        assert_eq!(path.origin, peer);
        assert_ne!(path.origin.to_string(), "9.9.9.9");
    }

    #[rstest(
        input,
        case(route("10.0.0.0/33", "", "")),
        case(route("not-a-prefix", "", "")),
        case(route("", "", "")),
    )]
    fn failed_path_from_route_invalid_prefix(input: proto::Route) {
        let peer: IpAddr = "203.0.113.5".parse().unwrap();
        match Path::from_route(&input, peer) {
            Err(Error::InvalidPrefix(p)) => assert_eq!(p, input.prefix),
            _ => unreachable!("prefix must not parse"),
        }
    }

    #[test]
    fn failed_path_from_route_invalid_next_hop() {
        let peer: IpAddr = "203.0.113.5".parse().unwrap();
        match Path::from_route(&route("10.0.0.0/24", "nine.nine", ""), peer) {
            Err(Error::InvalidNextHop(n)) => assert_eq!(n, "nine.nine"),
            _ => unreachable!("next hop must not parse"),
        }
    }

    #[test]
    fn works_path_into_proto() {
        let path = Path {
            prefix: "10.0.0.0/24".parse().unwrap(),
            next_hop: Some("9.9.9.9".parse().unwrap()),
            origin: "203.0.113.5".parse().unwrap(),
        };
        let p = proto::Path::from(&path);
        assert_eq!(p.prefix, "10.0.0.0/24");
        assert_eq!(p.next_hop, "9.9.9.9");
        assert_eq!(p.origin, "203.0.113.5");
    }
}
