/// Colour banding for long question lists (guide pages).
///
/// Every third entry starting at index 1 gets its own accent band; runs of
/// the remaining entries share a neutral band. Accent colours rotate through
/// a fixed four-colour palette, restarting on every call.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneKind {
    White,
    Terracotta,
    Indigo,
    Dark,
    TerracottaPale,
}

pub const ACCENT_PALETTE: [ZoneKind; 4] = [
    ZoneKind::Terracotta,
    ZoneKind::Indigo,
    ZoneKind::Dark,
    ZoneKind::TerracottaPale,
];

impl ZoneKind {
    pub fn is_neutral(self) -> bool {
        self == ZoneKind::White
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::White => "white",
            ZoneKind::Terracotta => "terracotta",
            ZoneKind::Indigo => "indigo",
            ZoneKind::Dark => "dark",
            ZoneKind::TerracottaPale => "terracotta-pale",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Zone {
    pub kind: ZoneKind,
    /// Entry indices in this band, ascending
    pub members: Vec<usize>,
}

/// How prominently an entry is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Emphasis {
    Featured,
    PullQuote,
    Compact,
}

/// Zones plus the emphasis of every entry, indexed by entry position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ZonePlan {
    pub zones: Vec<Zone>,
    pub emphasis: Vec<Emphasis>,
}

fn is_accent_slot(index: usize) -> bool {
    index > 0 && index % 3 == 1
}

pub fn build_zones(total: usize) -> Vec<Zone> {
    let mut zones = Vec::new();
    let mut neutral: Vec<usize> = Vec::new();
    let mut palette = ACCENT_PALETTE.iter().cycle();

    for i in 0..total {
        if !is_accent_slot(i) {
            neutral.push(i);
            continue;
        }
        if !neutral.is_empty() {
            zones.push(Zone {
                kind: ZoneKind::White,
                members: std::mem::take(&mut neutral),
            });
        }
        if let Some(&kind) = palette.next() {
            zones.push(Zone {
                kind,
                members: vec![i],
            });
        }
    }

    if !neutral.is_empty() {
        zones.push(Zone {
            kind: ZoneKind::White,
            members: neutral,
        });
    }
    zones
}

/// Emphasis of entry `index` out of `total`, given the band it sits in.
pub fn emphasis(index: usize, total: usize, zone: ZoneKind) -> Emphasis {
    if index == 0 || index == total / 2 {
        Emphasis::Featured
    } else if !zone.is_neutral() || is_accent_slot(index) {
        Emphasis::PullQuote
    } else {
        Emphasis::Compact
    }
}

pub fn plan(total: usize) -> ZonePlan {
    let zones = build_zones(total);
    let mut emphasis_by_index = vec![Emphasis::Compact; total];
    for zone in &zones {
        for &i in &zone.members {
            emphasis_by_index[i] = emphasis(i, total, zone.kind);
        }
    }
    ZonePlan {
        zones,
        emphasis: emphasis_by_index,
    }
}
