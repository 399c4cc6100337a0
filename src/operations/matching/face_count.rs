use tracing::debug;

/// Slot assignment for one mesh piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMatch {
    /// Name of the piece.
    pub piece: String,
    /// Index of the claimed slot, if any slot was left.
    pub slot: Option<usize>,
}

/// Counts faces per material slot from each polygon's slot index.
///
/// Returns `(slot, face count)` pairs ordered by each slot's first
/// appearance among the polygons. Slots used by no polygon are absent.
#[must_use]
pub fn slot_face_counts(polygon_slots: &[usize]) -> Vec<(usize, usize)> {
    let mut counts: Vec<(usize, usize)> = Vec::new();
    for &slot in polygon_slots {
        match counts.iter_mut().find(|(s, _)| *s == slot) {
            Some((_, faces)) => *faces += 1,
            None => counts.push((slot, 1)),
        }
    }
    counts
}

/// Pairs mesh pieces with material slots by polygon count.
///
/// Used after a mesh has been split back into pieces: each piece, in order,
/// claims the unclaimed slot whose face count is nearest its own. Ties go to
/// the slot listed first, so callers pass slots in first-use order (see
/// [`slot_face_counts`]). Pieces and slots without faces take no part.
pub struct MatchByFaceCount<'a> {
    pieces: &'a [(String, usize)],
    slots: &'a [(usize, usize)],
}

impl<'a> MatchByFaceCount<'a> {
    /// Creates a new `MatchByFaceCount` operation.
    ///
    /// `pieces` holds `(name, face count)` pairs; `slots` holds
    /// `(slot index, face count)` pairs of the reference mesh.
    #[must_use]
    pub fn new(pieces: &'a [(String, usize)], slots: &'a [(usize, usize)]) -> Self {
        Self { pieces, slots }
    }

    #[must_use]
    pub fn execute(&self) -> Vec<SlotMatch> {
        let mut available: Vec<(usize, usize)> = self
            .slots
            .iter()
            .copied()
            .filter(|&(_, faces)| faces > 0)
            .collect();

        let mut out = Vec::with_capacity(self.pieces.len());
        for (piece, faces) in self.pieces.iter().filter(|(_, f)| *f > 0) {
            let best = available
                .iter()
                .enumerate()
                .min_by_key(|(pos, (_, slot_faces))| (slot_faces.abs_diff(*faces), *pos))
                .map(|(pos, _)| pos);

            let slot = best.map(|pos| available.remove(pos).0);
            debug!(piece = %piece, faces, ?slot, "piece matched to slot");
            out.push(SlotMatch {
                piece: piece.clone(),
                slot,
            });
        }
        out
    }
}
