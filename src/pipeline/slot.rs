use scanflow_types::WorkPacket;

/// A pool packet together with its fixed slot number.
///
/// Not `Clone`: whoever holds the slot owns the packet, and
/// moving it into a queue is the only way to hand it over.
#[derive(Debug)]
pub struct PacketSlot {
    index: usize,
    pub packet: WorkPacket,
}

impl PacketSlot {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Allocates the whole packet pool up front.
pub fn allocate_pool(size: usize, pixels_per_packet: usize, samples_per_pixel: usize) -> Vec<PacketSlot> {
    let results = pixels_per_packet.saturating_mul(samples_per_pixel);
    (0..size)
        .map(|index| PacketSlot {
            index,
            packet: WorkPacket::with_capacity(pixels_per_packet, results),
        })
        .collect()
}
