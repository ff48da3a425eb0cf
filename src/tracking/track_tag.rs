/// Marker placed in the `mrkttag` parameter of the tracking URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackTag {
    Receive,
    Click,
}

impl TrackTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackTag::Receive => "1",
            TrackTag::Click => "2",
        }
    }
}

