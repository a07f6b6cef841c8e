use bitflags::bitflags;

bitflags! {
    /// The touch events a consumer listens to. Unsubscribed events are never emitted, and a
    /// gesture only slides along an axis if `MOVE` or that axis' move event is subscribed.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Subscriptions: u16 {
        const START = 1 << 0;
        const START_X = 1 << 1;
        const START_Y = 1 << 2;
        const MOVE = 1 << 3;
        const MOVE_X = 1 << 4;
        const MOVE_Y = 1 << 5;
        const END = 1 << 6;
        const END_X = 1 << 7;
        const END_Y = 1 << 8;
        const HOVER_ENTER = 1 << 9;
        const HOVER_LEAVE = 1 << 10;
    }
}

impl Subscriptions {
    pub fn slides_x(self) -> bool {
        self.intersects(Self::MOVE | Self::MOVE_X)
    }

    pub fn slides_y(self) -> bool {
        self.intersects(Self::MOVE | Self::MOVE_Y)
    }
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self::all()
    }
}
