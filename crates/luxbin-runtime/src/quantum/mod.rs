//! Moteur de qubits simulés.
//!
//! Modèle volontairement limité : chaque qubit porte ses deux amplitudes,
//! indépendamment des autres. L'« intrication » n'est qu'un lien nommé vers un
//! partenaire ; seule `cnot` lit l'état d'un autre qubit.
//!
//! Les qubits vivent dans une [`QubitTable`] possédée par le contexte
//! d'exécution et sont désignés par [`QubitId`]. Rien n'est jamais retiré de
//! la table : un identifiant de partenaire ne peut donc pas pendre. Chaque
//! identifiant porte la marque de sa table et n'est résolu que par elle.
//!
//! Les sept opérations renvoient `false`/`None` quand un identifiant est
//! inconnu ; elles ne paniquent jamais.

use core::{
    fmt,
    num::NonZeroU32,
    sync::atomic::{AtomicU32, Ordering},
};

use num_complex::Complex64;
use rand::Rng;

mod qubit;

pub use qubit::Qubit;

/* ------------------------------ Identifiants ------------------------------ */

/// Identifiant de qubit : marque de la table émettrice + indice `u32` non nul
/// (0 = NULL réservé, jamais résolu).
///
/// Un identifiant ne se résout que dans la table qui l'a émis : celui d'un
/// autre contexte (ou d'un appel détaché) est inconnu partout ailleurs.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct QubitId {
    table: u32,
    slot: Option<NonZeroU32>,
}

impl QubitId {
    /// Construit depuis la forme brute, sans table émettrice (0 donne NULL).
    ///
    /// Un tel identifiant s'affiche normalement mais ne désigne aucun qubit.
    #[inline]
    pub const fn from_u32(v: u32) -> Self {
        Self { table: 0, slot: NonZeroU32::new(v) }
    }

    /// Forme brute (0 pour NULL).
    #[inline]
    pub const fn to_u32(self) -> u32 {
        match self.slot {
            Some(nz) => nz.get(),
            None => 0,
        }
    }

    /// Marque de la table émettrice (0 : aucune).
    #[inline]
    pub const fn table(self) -> u32 {
        self.table
    }

    /// Vrai pour l'identifiant NULL.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.slot.is_none()
    }
}

/// Identifiant du `index`-ième qubit d'une table ; `None` au-delà de `u32::MAX`.
fn id_at(table: u32, index: usize) -> Option<QubitId> {
    let raw = u32::try_from(index.checked_add(1)?).ok()?;
    Some(QubitId { table, slot: Some(NonZeroU32::new(raw)?) })
}

impl fmt::Debug for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Some(nz) => write!(f, "QubitId({}@{})", nz.get(), self.table),
            None => f.write_str("QubitId(NULL)"),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use core::num::NonZeroU32;

    use super::QubitId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // (table, indice)
    impl Serialize for QubitId {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            (self.table, self.to_u32()).serialize(s)
        }
    }

    impl<'de> Deserialize<'de> for QubitId {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let (table, raw) = <(u32, u32)>::deserialize(d)?;
            Ok(QubitId { table, slot: NonZeroU32::new(raw) })
        }
    }
}

/* --------------------------------- Table --------------------------------- */

// 0 est réservé aux identifiants sans table
static NEXT_TABLE: AtomicU32 = AtomicU32::new(1);

/// Table append-only des qubits d'un contexte.
///
/// Chaque table reçoit une marque unique au processus, recopiée dans les
/// identifiants qu'elle émet. Un clone garde la marque : c'est un instantané
/// du même contexte.
#[derive(Clone)]
pub struct QubitTable {
    stamp: u32,
    qubits: Vec<Qubit>,
}

impl Default for QubitTable {
    fn default() -> Self {
        Self { stamp: NEXT_TABLE.fetch_add(1, Ordering::Relaxed), qubits: Vec::new() }
    }
}

impl fmt::Debug for QubitTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QubitTable")
            .field("stamp", &self.stamp)
            .field("len", &self.qubits.len())
            .finish()
    }
}

impl QubitTable {
    /// Table vide, avec une nouvelle marque.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre de qubits alloués.
    #[inline]
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Vrai si aucun qubit n'a été alloué.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Range un qubit et renvoie son identifiant.
    ///
    /// `None` (rien n'est rangé) quand la table a épuisé ses `u32::MAX` indices.
    pub fn alloc(&mut self, qubit: Qubit) -> Option<QubitId> {
        let Some(id) = id_at(self.stamp, self.qubits.len()) else {
            tracing::debug!(table = self.stamp, "table de qubits pleine");
            return None;
        };
        self.qubits.push(qubit);
        tracing::trace!(qubit = id.to_u32(), table = self.stamp, "qubit alloué");
        Some(id)
    }

    #[inline]
    fn index(&self, id: QubitId) -> Option<usize> {
        if id.table != self.stamp {
            return None;
        }
        id.slot.map(|nz| (nz.get() - 1) as usize)
    }

    /// Lecture ; `None` pour NULL ou un identifiant d'une autre table.
    #[inline]
    pub fn get(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.get(self.index(id)?)
    }

    /// Écriture.
    #[inline]
    pub fn get_mut(&mut self, id: QubitId) -> Option<&mut Qubit> {
        let index = self.index(id)?;
        self.qubits.get_mut(index)
    }

    /// Vrai si `id` désigne un qubit de cette table.
    #[inline]
    pub fn contains(&self, id: QubitId) -> bool {
        self.get(id).is_some()
    }

    /// Copie des amplitudes courantes.
    pub fn state(&self, id: QubitId) -> Option<[Complex64; 2]> {
        self.get(id).map(|q| q.state)
    }

    /// Partenaire d'intrication.
    pub fn partner(&self, id: QubitId) -> Option<QubitId> {
        self.get(id).and_then(|q| q.entangled_with)
    }

    /// Itère `(id, qubit)` dans l'ordre d'allocation.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, &Qubit)> + '_ {
        let stamp = self.stamp;
        self.qubits
            .iter()
            .enumerate()
            .filter_map(move |(i, q)| Some((id_at(stamp, i)?, q)))
    }

    /* ----------------------------- Opérations ----------------------------- */

    /// `superpose` : nouveau qubit `(1/√n, 1/√n)`, `n = 0` valant 2.
    ///
    /// `None` si la table est pleine.
    pub fn superpose(&mut self, n: usize) -> Option<QubitId> {
        self.alloc(Qubit::superposed(n))
    }

    /// `measure` : un tirage uniforme ; 0 avec probabilité `|a0|²`, sinon 1.
    ///
    /// L'état s'effondre sur la base correspondante. `None` si `id` est inconnu.
    pub fn measure<R: Rng + ?Sized>(&mut self, id: QubitId, rng: &mut R) -> Option<u8> {
        let q = self.get_mut(id)?;
        let sample: f64 = rng.gen();
        let outcome = u8::from(sample >= q.probability_zero());
        q.collapse(outcome);
        tracing::trace!(qubit = id.to_u32(), outcome, "mesure");
        Some(outcome)
    }

    /// `entangle` : lie mutuellement `a` et `b`, sans toucher aux états.
    ///
    /// Un ancien partenaire de `a` ou `b` garde son lien vers eux.
    pub fn entangle(&mut self, a: QubitId, b: QubitId) -> bool {
        if !(self.contains(a) && self.contains(b)) {
            return false;
        }
        if let Some(q) = self.get_mut(a) {
            q.entangled_with = Some(b);
        }
        if let Some(q) = self.get_mut(b) {
            q.entangled_with = Some(a);
        }
        true
    }

    /// `hadamard` : `((a0+a1)/√2, (a0-a1)/√2)` sur l'état courant, quel qu'il soit.
    pub fn hadamard(&mut self, id: QubitId) -> bool {
        self.get_mut(id).map(Qubit::apply_hadamard).is_some()
    }

    /// `cnot` : si le contrôle penche vers 1 (`|a1| > |a0|`), échange les
    /// amplitudes de la cible.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> bool {
        let Some(favors_one) = self.get(control).map(Qubit::favors_one) else {
            return false;
        };
        let Some(t) = self.get_mut(target) else {
            return false;
        };
        if favors_one {
            t.flip();
        }
        true
    }

    /// `phase` : `a1 *= cos θ + i·sin θ`.
    pub fn phase(&mut self, id: QubitId, angle: f64) -> bool {
        self.get_mut(id).map(|q| q.apply_phase(angle)).is_some()
    }

    /// `teleport` : copie l'état de `src` dans `dst`, puis remet `src` à `(1,0)`.
    ///
    /// Transfert destructif, pas de téléportation physique. Les liens
    /// d'intrication ne bougent pas.
    pub fn teleport(&mut self, src: QubitId, dst: QubitId) -> bool {
        if !self.contains(dst) {
            return false;
        }
        let Some(state) = self.state(src) else {
            return false;
        };
        if let Some(d) = self.get_mut(dst) {
            d.state = state;
        }
        if let Some(s) = self.get_mut(src) {
            s.reset();
        }
        true
    }

    /// Opt-in : renormalise un qubit (voir [`Qubit::normalize`]).
    pub fn normalize(&mut self, id: QubitId) -> bool {
        self.get_mut(id).is_some_and(Qubit::normalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn null_and_unstamped_ids_never_resolve() {
        let mut t = QubitTable::new();
        let q = t.superpose(2).unwrap();
        assert_eq!(q.to_u32(), 1);
        assert!(t.get(QubitId::default()).is_none());
        assert!(t.get(QubitId::from_u32(1)).is_none());
        assert!(!t.hadamard(QubitId::from_u32(9)));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(t.measure(QubitId::from_u32(9), &mut rng), None);
    }

    #[test]
    fn ids_are_bound_to_their_table() {
        let mut mine = QubitTable::new();
        let mut other = QubitTable::new();
        let a = mine.alloc(Qubit::one()).unwrap();
        let b = other.alloc(Qubit::zero()).unwrap();
        assert_eq!(a.to_u32(), b.to_u32());
        assert_ne!(a.table(), b.table());

        assert!(!mine.contains(b));
        assert!(!mine.teleport(a, b));
        assert!(!mine.entangle(a, b));
        assert_eq!(mine.get(a), Some(&Qubit::one()));
        assert_eq!(mine.partner(a), None);
    }

    #[test]
    fn ids_stop_at_u32_max() {
        let last = u32::MAX as usize - 1;
        assert_eq!(id_at(7, last).map(QubitId::to_u32), Some(u32::MAX));
        assert_eq!(id_at(7, last + 1), None);
        assert_eq!(id_at(7, usize::MAX), None);
    }

    #[test]
    fn cnot_reads_control_only() {
        let mut t = QubitTable::new();
        let c = t.alloc(Qubit::one()).unwrap();
        let target = t.alloc(Qubit::zero()).unwrap();
        assert!(t.cnot(c, target));
        assert_eq!(t.get(target), Some(&Qubit::one()));
        assert_eq!(t.get(c), Some(&Qubit::one()));

        // contrôle équilibré : |a1| == |a0| → pas d'échange
        let balanced = t.superpose(2).unwrap();
        assert!(t.cnot(balanced, target));
        assert_eq!(t.get(target), Some(&Qubit::one()));
    }

    #[test]
    fn teleport_onto_itself_resets() {
        let mut t = QubitTable::new();
        let q = t.alloc(Qubit::one()).unwrap();
        assert!(t.teleport(q, q));
        assert_eq!(t.get(q), Some(&Qubit::zero()));
    }

    #[test]
    fn iter_follows_allocation_order() {
        let mut t = QubitTable::new();
        let a = t.superpose(0).unwrap();
        let b = t.alloc(Qubit::one()).unwrap();
        let ids: Vec<_> = t.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
    }
}
