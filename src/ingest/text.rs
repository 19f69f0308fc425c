//! Parser for per-host `ip -brief -4 address` output.
//!
//! Parallel shells such as `clush` or `pdsh` prefix every line with the host:
//!
//! ```text
//! nvme1: 100g1            UP             10.100.0.7/31
//! gw1.example.net: eno1   DOWN
//! gw1.example.net: lo     UNKNOWN        127.0.0.1/8 ::1/128
//! ```

use crate::models::{InterfaceRecord, Ipv4, LinkStatus};
use regex::Regex;
use std::sync::OnceLock;

static LINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_line_regex() -> &'static Regex {
    LINE_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(?P<node>[^:\s]+):\s+(?P<iface>\S+)\s+(?P<state>[A-Za-z_-]+)\s*(?P<addrs>.*)$")
            .expect("Invalid Regex")
    })
}

/// A line the parser could not turn into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number, or record position for JSON input.
    pub line_no: usize,
    pub line: String,
    pub reason: String,
}

/// Records parsed from one input, plus what was rejected on the way.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub records: Vec<InterfaceRecord>,
    pub rejected: Vec<RejectedLine>,
}

/// Records of one line, plus the address entries that did not parse.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub records: Vec<InterfaceRecord>,
    pub invalid: Vec<String>,
}

/// Strip the domain from a host name.
pub fn short_hostname(node: &str) -> &str {
    node.split('.').next().unwrap_or(node)
}

/// Parse the whole text, one record per IPv4 address.
pub fn parse_text(input: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for (i, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let reason = match parse_line(line) {
            Ok(ParsedLine { records, invalid }) => {
                parsed.records.extend(records);
                if invalid.is_empty() {
                    continue;
                }
                invalid.join(", ")
            }
            Err(reason) => reason,
        };
        log::warn!("line {}: {reason}: '{trimmed}'", i + 1);
        parsed.rejected.push(RejectedLine {
            line_no: i + 1,
            line: line.to_string(),
            reason,
        });
    }

    log::info!(
        "Parsed {} interface records, rejected {} lines",
        parsed.records.len(),
        parsed.rejected.len()
    );
    parsed
}

/// Parse one line. IPv6 addresses are ignored.
///
/// A bad IPv4 entry is reported in [`ParsedLine::invalid`] without dropping the
/// other addresses of the line. Fails only when the line has no
/// `node: iface STATE` shape at all.
pub fn parse_line(line: &str) -> Result<ParsedLine, String> {
    let caps = get_line_regex()
        .captures(line)
        .ok_or_else(|| "not a 'node: iface STATE addr/len' line".to_string())?;

    let node = short_hostname(&caps["node"]);
    // VLAN and veth names carry their parent after '@'.
    let interface = caps["iface"].split('@').next().unwrap_or(&caps["iface"]);
    let status = LinkStatus::from_operstate(&caps["state"]);

    let mut parsed = ParsedLine::default();
    for addr in caps["addrs"].split_whitespace().filter(|a| !a.contains(':')) {
        match Ipv4::new(addr) {
            Ok(ip) => parsed.records.push(InterfaceRecord {
                node: node.to_string(),
                interface: interface.to_string(),
                status,
                address: ip.addr,
                prefix_len: ip.mask,
            }),
            Err(e) => parsed.invalid.push(e.to_string()),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_line_single() {
        let records = parse_line("nvme1: 100g1            UP             10.100.0.7/31 ")
            .unwrap()
            .records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node, "nvme1");
        assert_eq!(records[0].interface, "100g1");
        assert_eq!(records[0].status, LinkStatus::Up);
        assert_eq!(records[0].address, Ipv4Addr::new(10, 100, 0, 7));
        assert_eq!(records[0].prefix_len, 31);
    }

    #[test]
    fn test_parse_line_fqdn_multi_and_ipv6() {
        let records = parse_line("gw1.example.net: mgmt UP 10.11.26.1/24 10.11.27.1/24 fe80::1/64")
            .unwrap()
            .records;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.node == "gw1"));
        assert_eq!(records[1].address, Ipv4Addr::new(10, 11, 27, 1));
    }

    #[test]
    fn test_parse_line_states() {
        assert_eq!(parse_line("gw1: eno1 DOWN").unwrap(), ParsedLine::default());
        let lo = parse_line("gw1: lo UNKNOWN 127.0.0.1/8 ::1/128").unwrap().records;
        assert_eq!(lo[0].status, LinkStatus::Down);
        let vlan = parse_line("gw1: bond0.100@bond0 UP 10.5.0.1/24").unwrap().records;
        assert_eq!(vlan[0].interface, "bond0.100");
    }

    #[test]
    fn test_parse_line_rejects() {
        assert!(parse_line("garbage without prefix").is_err());
        let bad_octet = parse_line("gw1: 100g1 UP 10.100.0.300/31").unwrap();
        assert!(bad_octet.records.is_empty());
        assert_eq!(bad_octet.invalid.len(), 1);
        let no_prefix = parse_line("gw1: 100g1 UP 10.100.0.3").unwrap();
        assert!(no_prefix.invalid[0].contains("missing prefix"));
    }

    #[test]
    fn test_parse_line_keeps_good_addresses() {
        let parsed = parse_line("gw1: mgmt UP 10.1.1.1/24 10.1.1.999/24").unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].address, Ipv4Addr::new(10, 1, 1, 1));
        assert_eq!(parsed.invalid.len(), 1);
        assert!(parsed.invalid[0].contains("10.1.1.999"), "{:?}", parsed.invalid);
    }

    #[test]
    fn test_parse_text_keeps_going() {
        let input = "\
# collected by clush
nvme1: 100g1 UP 10.100.0.7/31

gw1: 100g4 UP 10.100.0.6/31
gw1: 100g2 UP 10.100.0.999/31
ssh: connect to host nvme9 port 22: Connection refused
";
        let parsed = parse_text(input);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.rejected.len(), 2);
        assert_eq!(parsed.rejected[0].line_no, 5);
        assert_eq!(parsed.rejected[1].line_no, 6);
    }

    #[test]
    fn test_parse_text_partial_line() {
        let input = "gw1: mgmt UP 10.1.1.1/24 10.1.1.999/24\nnvme1: mgmt UP 10.2.1.5/24\n";
        let parsed = parse_text(input);
        let nodes: Vec<&str> = parsed.records.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(nodes, vec!["gw1", "nvme1"]);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line_no, 1);
        assert!(parsed.rejected[0].reason.contains("10.1.1.999"));
    }

    #[test]
    fn test_short_hostname() {
        assert_eq!(short_hostname("nvme1.cluster.local"), "nvme1");
        assert_eq!(short_hostname("nvme1"), "nvme1");
    }
}
