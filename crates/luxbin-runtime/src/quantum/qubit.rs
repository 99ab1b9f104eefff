//! Un qubit simulé : deux amplitudes complexes + un partenaire optionnel.

use num_complex::Complex64;

use super::QubitId;

const ONE: Complex64 = Complex64::new(1.0, 0.0);
const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Système à deux niveaux, **indépendant** : pas d'espace d'états joint.
///
/// Aucune porte ne renormalise `state` ; la dérive de norme est conservée
/// telle quelle (voir [`normalize`](Self::normalize) pour l'opt-in).
#[derive(Debug, Clone, PartialEq)]
pub struct Qubit {
    /// Amplitudes `(a0, a1)` des issues 0 et 1.
    pub state: [Complex64; 2],
    /// Partenaire d'intrication (référence non possédante, peut former un 2-cycle).
    pub entangled_with: Option<QubitId>,
}

impl Default for Qubit {
    fn default() -> Self {
        Self::zero()
    }
}

impl Qubit {
    /// État de base `(1, 0)`.
    pub const fn zero() -> Self {
        Self { state: [ONE, ZERO], entangled_with: None }
    }

    /// État de base `(0, 1)`.
    pub const fn one() -> Self {
        Self { state: [ZERO, ONE], entangled_with: None }
    }

    /// Qubit aux amplitudes données, sans partenaire.
    pub const fn from_amplitudes(a0: Complex64, a1: Complex64) -> Self {
        Self { state: [a0, a1], entangled_with: None }
    }

    /// Superposition réelle uniforme `(1/√n, 1/√n)` ; `n = 0` vaut `n = 2`.
    ///
    /// Pour `n != 2` le résultat n'est pas normé : c'est voulu.
    pub fn superposed(n: usize) -> Self {
        let n = if n == 0 { 2 } else { n };
        let amp = Complex64::new(1.0 / (n as f64).sqrt(), 0.0);
        Self::from_amplitudes(amp, amp)
    }

    /// `|a0|²`.
    pub fn probability_zero(&self) -> f64 {
        self.state[0].norm_sqr()
    }

    /// `|a1|²`.
    pub fn probability_one(&self) -> f64 {
        self.state[1].norm_sqr()
    }

    /// `|a0|² + |a1|²` (1 pour un état normé).
    pub fn norm_sqr(&self) -> f64 {
        self.probability_zero() + self.probability_one()
    }

    /// Effondre sur l'issue donnée : 0 → `(1,0)`, sinon `(0,1)`.
    pub(crate) fn collapse(&mut self, outcome: u8) {
        self.state = if outcome == 0 { [ONE, ZERO] } else { [ZERO, ONE] };
    }

    /// `((a0+a1)/√2, (a0-a1)/√2)`.
    pub(crate) fn apply_hadamard(&mut self) {
        let [a, b] = self.state;
        let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        self.state = [(a + b) * inv_sqrt2, (a - b) * inv_sqrt2];
    }

    /// `a1 *= e^(iθ)`, `a0` intact.
    pub(crate) fn apply_phase(&mut self, angle: f64) {
        self.state[1] *= Complex64::new(angle.cos(), angle.sin());
    }

    /// Échange les deux amplitudes (porte X).
    pub(crate) fn flip(&mut self) {
        self.state.swap(0, 1);
    }

    /// Le contrôle « penche » vers 1 : `|a1| > |a0|`.
    pub(crate) fn favors_one(&self) -> bool {
        self.state[1].norm() > self.state[0].norm()
    }

    /// Remet à `(1,0)` (source d'une téléportation).
    pub(crate) fn reset(&mut self) {
        self.state = [ONE, ZERO];
    }

    /// Opt-in : ramène `|a0|²+|a1|²` à 1.
    ///
    /// Renvoie `false` (et ne touche à rien) si la norme est nulle ou non finie.
    /// Aucune opération du moteur ne l'appelle d'elle-même.
    pub fn normalize(&mut self) -> bool {
        let norm = self.norm_sqr().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return false;
        }
        self.state[0] /= norm;
        self.state[1] /= norm;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn superposed_uses_argument_count() {
        let q = Qubit::superposed(0);
        assert!((q.probability_zero() - 0.5).abs() < EPS);
        let q3 = Qubit::superposed(3);
        assert!((q3.state[0].re - 1.0 / 3f64.sqrt()).abs() < EPS);
        // non normé, et c'est voulu
        assert!((q3.norm_sqr() - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn phase_only_touches_second_amplitude() {
        let mut q = Qubit::superposed(2);
        let a0 = q.state[0];
        q.apply_phase(std::f64::consts::PI);
        assert!(close(q.state[0], a0));
        assert!(close(q.state[1], Complex64::new(-std::f64::consts::FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn normalize_is_explicit() {
        let mut q = Qubit::superposed(4);
        assert!((q.norm_sqr() - 0.5).abs() < EPS);
        assert!(q.normalize());
        assert!((q.norm_sqr() - 1.0).abs() < EPS);

        let mut dead = Qubit::from_amplitudes(ZERO, ZERO);
        assert!(!dead.normalize());
        assert_eq!(dead.state, [ZERO, ZERO]);
    }
}
