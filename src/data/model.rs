use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Group – which benchmark dimension a series was measured against
// ---------------------------------------------------------------------------

/// Partition of the results by the quantity on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Timings against the number of elements sorted.
    ArrayLength,
    /// Timings against the range of the generated input values.
    InputRange,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::ArrayLength, Group::InputRange];

    /// Filename token that marks a file as belonging to this group.
    pub fn file_token(self) -> &'static str {
        match self {
            Group::ArrayLength => ".array_length",
            Group::InputRange => ".input_range",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Group::ArrayLength => "Array Length",
            Group::InputRange => "Input Range",
        }
    }

    /// The other group.
    pub fn other(self) -> Group {
        match self {
            Group::ArrayLength => Group::InputRange,
            Group::InputRange => Group::ArrayLength,
        }
    }

    /// Split a file stem into `(title, group)`.
    ///
    /// The group token is removed from the title. A stem without any token
    /// belongs to [`Group::ArrayLength`].
    pub fn classify(stem: &str) -> (String, Group) {
        for group in Group::ALL {
            let token = group.file_token();
            if stem.contains(token) {
                return (stem.replace(token, ""), group);
            }
        }
        (stem.to_string(), Group::ArrayLength)
    }
}

impl Default for Group {
    fn default() -> Self {
        Group::ArrayLength
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.axis_label())
    }
}

// ---------------------------------------------------------------------------
// Series – the measurements of one results file
// ---------------------------------------------------------------------------

/// One named sequence of (x, y) timing measurements, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    title: String,
    group: Group,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Series {
    /// Build a series from its points. Returns `None` when `points` is empty.
    pub fn new(title: impl Into<String>, group: Group, points: Vec<(f64, f64)>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let (x, y) = points.into_iter().unzip();
        Some(Series {
            title: title.into(),
            group,
            x,
            y,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn group(&self) -> Group {
        self.group
    }

    /// X values (array length or input range).
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y values (time) – same length as `x`.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y])
    }
}

// ---------------------------------------------------------------------------
// SeriesCollection – everything loaded from a results directory
// ---------------------------------------------------------------------------

/// All loaded series. Order is fixed at construction and also decides the
/// palette slot of each series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesCollection {
    series: Vec<Series>,
}

impl SeriesCollection {
    pub fn new(series: Vec<Series>) -> Self {
        SeriesCollection { series }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// Series of `group` together with their palette slot.
    pub fn in_group(&self, group: Group) -> impl Iterator<Item = (usize, &Series)> {
        self.series
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.group == group)
    }

    /// Titles of `group`, in collection order.
    pub fn titles(&self, group: Group) -> Vec<String> {
        self.in_group(group)
            .map(|(_, s)| s.title.clone())
            .collect()
    }

    pub fn group_len(&self, group: Group) -> usize {
        self.in_group(group).count()
    }
}
