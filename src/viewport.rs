use std::collections::{BTreeMap, BTreeSet};

pub const VISIBILITY_THRESHOLD: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    Hero,
    About,
    Skills,
    Projects,
    Contact,
}

impl RegionId {
    pub const ALL: [RegionId; 5] = [
        Self::Hero,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "hero" => Some(Self::Hero),
            "about" => Some(Self::About),
            "skills" => Some(Self::Skills),
            "projects" => Some(Self::Projects),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }

    /// Background drift relative to foreground scroll. Smaller drifts less.
    pub fn parallax_factor(self) -> f64 {
        match self {
            Self::Hero => 0.2,
            Self::About => 0.1,
            Self::Skills => 0.08,
            Self::Projects => 0.06,
            Self::Contact => 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
}

impl ScrollState {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityUpdate {
    pub region: RegionId,
    pub visible: bool,
}

/// Last reported visibility per region. Regions that never reported read as hidden.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityMap {
    entries: BTreeMap<RegionId, bool>,
}

impl VisibilityMap {
    pub fn is_visible(&self, region: RegionId) -> bool {
        self.entries.get(&region).copied().unwrap_or(false)
    }

    pub fn contains(&self, region: RegionId) -> bool {
        self.entries.contains_key(&region)
    }

    /// Returns true when the entry changed.
    pub fn apply(&mut self, update: VisibilityUpdate) -> bool {
        self.entries.insert(update.region, update.visible) != Some(update.visible)
    }
}

pub fn crosses_threshold(ratio: f64) -> bool {
    ratio >= VISIBILITY_THRESHOLD
}

pub fn parallax_offset(scroll: ScrollState, top_offset: f64, factor: f64) -> f64 {
    (scroll.offset - top_offset) * factor
}

/// Host-side observation mechanism for region bounding boxes.
pub trait Observer {
    /// Returns false when the region has no element to observe.
    fn observe(&mut self, region: RegionId) -> bool;
    fn unobserve(&mut self, region: RegionId);
}

pub struct VisibilityTracker<O: Observer> {
    observer: Option<O>,
    registered: BTreeSet<RegionId>,
}

impl<O: Observer> VisibilityTracker<O> {
    /// `None` means the host cannot observe intersections; registered regions fail open.
    pub fn new(observer: Option<O>) -> Self {
        Self {
            observer,
            registered: BTreeSet::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.observer.is_some()
    }

    #[cfg(test)]
    fn is_registered(&self, region: RegionId) -> bool {
        self.registered.contains(&region)
    }

    pub fn register(&mut self, region: RegionId) -> Option<VisibilityUpdate> {
        let Some(observer) = self.observer.as_mut() else {
            self.registered.insert(region);
            return Some(VisibilityUpdate {
                region,
                visible: true,
            });
        };

        if self.registered.contains(&region) || !observer.observe(region) {
            return None;
        }

        self.registered.insert(region);
        None
    }

    pub fn unregister(&mut self, region: RegionId) {
        if !self.registered.remove(&region) {
            return;
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.unobserve(region);
        }
    }

    /// Converts a host intersection report into an update for a registered region.
    pub fn record(&self, region: RegionId, ratio: f64) -> Option<VisibilityUpdate> {
        if !self.registered.contains(&region) {
            return None;
        }

        Some(VisibilityUpdate {
            region,
            visible: crosses_threshold(ratio),
        })
    }

    pub fn teardown(&mut self) {
        let regions: Vec<RegionId> = self.registered.iter().copied().collect();
        for region in regions {
            self.unregister(region);
        }
    }
}

impl<O: Observer> Drop for VisibilityTracker<O> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[derive(Debug)]
pub struct ScrollTracker {
    state: ScrollState,
    subscribed: bool,
}

impl ScrollTracker {
    pub fn mount(initial_offset: f64) -> Self {
        Self {
            state: ScrollState::new(initial_offset),
            subscribed: true,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Stores the offset verbatim while subscribed.
    pub fn record(&mut self, offset: f64) -> Option<ScrollState> {
        if !self.subscribed {
            return None;
        }

        self.state = ScrollState::new(offset);
        Some(self.state)
    }

    pub fn teardown(&mut self) {
        self.subscribed = false;
    }
}
