/// Geometry of one visible slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptionProperty {
    pub height: f64,
    /// Height of the slot text, never more than `height`.
    pub font_height: f64,
    /// Signed offset that moves this slot into the place of its upper neighbour.
    pub prev_distance: f64,
    /// Signed offset that moves this slot into the place of its lower neighbour.
    pub next_distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Positive deltas scroll down, everything else scrolls up.
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0. {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    }
}

impl OptionProperty {
    pub fn new(height: f64, font_height: f64) -> Self {
        Self {
            height,
            font_height: font_height.min(height),
            prev_distance: 0.,
            next_distance: 0.,
        }
    }

    pub fn distance(&self, dir: ScrollDirection) -> f64 {
        match dir {
            ScrollDirection::Up => self.prev_distance,
            ScrollDirection::Down => self.next_distance,
        }
    }
}

/// Recomputes `prev_distance` and `next_distance` of every slot.
///
/// With `text_geometry` the slots around the middle account for the text being smaller than
/// its slot, otherwise every slot moves by the mean of its own and its neighbour's height.
pub fn update_shift_distances(props: &mut [OptionProperty], text_geometry: bool) {
    for index in 0..props.len() {
        let prev = shift_distance(props, index, ScrollDirection::Up, text_geometry);
        let next = shift_distance(props, index, ScrollDirection::Down, text_geometry);
        props[index].prev_distance = prev;
        props[index].next_distance = next;
    }
}

/// Distance slot `index` travels to reach its neighbour in direction `dir`.
pub fn shift_distance(
    props: &[OptionProperty],
    index: usize,
    dir: ScrollDirection,
    text_geometry: bool,
) -> f64 {
    let count = props.len();
    if index >= count {
        return 0.;
    }

    let next = match dir {
        ScrollDirection::Down => (index + 1) % count,
        ScrollDirection::Up => (count + index - 1) % count,
    };
    let this = props[index];
    let other = props[next];

    let signed = |val: f64| match dir {
        ScrollDirection::Down => val,
        ScrollDirection::Up => -val,
    };

    if index == 0 {
        return signed(this.height);
    }

    let mid = count / 2;
    let pos = index as isize - mid as isize;
    if !text_geometry && (-1..=1).contains(&pos) {
        return signed(((this.height + other.height) / 2.).round());
    }

    match (pos, dir) {
        // Up-candidate.
        (-1, ScrollDirection::Up) => -other.height,
        (-1, ScrollDirection::Down) => {
            (this.height + (other.height - other.font_height) / 2.).round()
        }

        // Selected.
        (0, _) if other.font_height >= other.height => match dir {
            ScrollDirection::Up => -other.height,
            ScrollDirection::Down => this.height,
        },
        (0, _) => signed((this.height / 2. + other.height - other.font_height / 2.).round()),

        // Down-candidate.
        (1, ScrollDirection::Down) => this.height,
        (1, ScrollDirection::Up) => {
            let mut val = this.height + (other.height - other.font_height) / 2.;
            if other.font_height > this.height {
                val += other.font_height - this.height;
            }
            -val.round()
        }

        (_, ScrollDirection::Down) => this.height,
        (_, ScrollDirection::Up) => -other.height,
    }
}
