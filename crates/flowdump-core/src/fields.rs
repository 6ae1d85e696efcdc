//! Flow record field names
//!
//! The dump producer writes flow entry attributes under their numeric
//! attribute id and flow key fields under two-letter abbreviations. These
//! tables map both to the long-form names shown to operators.

/// Flow entry attribute ids, indexed by code
const ATTRIBUTE_NAMES: &[&str] = &[
    "ACTION",
    "VERSION",
    "DASH_DIRECTION",
    "DASH_FLOW_ACTION",
    "METER_CLASS",
    "IS_UNIDIRECTIONAL_FLOW",
    "DASH_FLOW_SYNC_STATE",
    "REVERSE_FLOW_ENI_MAC",
    "REVERSE_FLOW_VNET_ID",
    "REVERSE_FLOW_SRC_IP",
    "REVERSE_FLOW_DST_IP",
    "REVERSE_FLOW_IP_PROTO",
    "REVERSE_FLOW_SRC_PORT",
    "REVERSE_FLOW_DST_PORT",
    "REVERSE_FLOW_DST_IP_IS_V6",
    "UNDERLAY0_VNET_ID",
    "UNDERLAY0_SIP",
    "UNDERLAY0_DIP",
    "UNDERLAY0_SMAC",
    "UNDERLAY0_DMAC",
    "UNDERLAY0_DASH_ENCAPSULATION",
    "UNDERLAY1_VNET_ID",
    "UNDERLAY1_SIP",
    "UNDERLAY1_DIP",
    "UNDERLAY1_SMAC",
    "UNDERLAY1_DMAC",
    "UNDERLAY1_DASH_ENCAPSULATION",
    "DST_MAC",
    "SIP",
    "DIP",
    "SIP_MASK",
    "DIP_MASK",
    "VENDOR_METADATA",
    "FLOW_DATA_PB",
];

/// Flow key abbreviations
const KEY_ABBREVIATIONS: &[(&str, &str)] = &[
    ("em", "ENI_MAC"),
    ("vi", "VNET_ID"),
    ("pr", "IP_PROTO"),
    ("si", "SRC_IP"),
    ("di", "DST_IP"),
    ("sp", "SRC_PORT"),
    ("dp", "DST_PORT"),
    ("v6", "IS_IP_V6"),
];

/// Long-form name of a numeric attribute code
pub fn attribute_name(code: &str) -> Option<&'static str> {
    code.parse::<usize>()
        .ok()
        .and_then(|index| ATTRIBUTE_NAMES.get(index).copied())
}

/// Long-form name of a key abbreviation
pub fn expand_abbreviation(key: &str) -> Option<&'static str> {
    KEY_ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == key)
        .map(|(_, long)| *long)
}

fn is_numeric_code(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Map a raw field key to the name it is displayed under
///
/// Numeric codes without a table entry stay as the raw string. Keys that are
/// already long-form pass through, so relabeling twice is the same as once.
pub fn relabel_key(key: &str) -> String {
    let mapped = if is_numeric_code(key) {
        attribute_name(key)
    } else {
        expand_abbreviation(key)
    };
    mapped.map_or_else(|| key.to_string(), str::to_string)
}
