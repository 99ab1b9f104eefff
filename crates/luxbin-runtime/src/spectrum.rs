//! Table caractère ↔ longueur d'onde (nm) partagée avec le lexer.
//!
//! Le spectre visible 400–700 nm est découpé uniformément dans l'ordre de la
//! table. L'ordre de définition compte : c'est lui qui départage les
//! égalités de la recherche inverse.

/// Longueur d'onde renvoyée pour un caractère absent de la table ou une entrée vide.
pub const DEFAULT_WAVELENGTH: f64 = 540.3;

/// Table de référence, dans l'ordre de définition.
#[rustfmt::skip]
pub const CHAR_WAVELENGTHS: &[(char, f64)] = &[
    (' ', 400.0), ('A', 403.1), ('B', 406.2), ('C', 409.4), ('D', 412.5), ('E', 415.6),
    ('F', 418.8), ('G', 421.9), ('H', 425.0), ('I', 428.1), ('J', 431.2), ('K', 434.4),
    ('L', 437.5), ('M', 440.6), ('N', 443.8), ('O', 446.9), ('P', 450.0), ('Q', 453.1),
    ('R', 456.2), ('S', 459.4), ('T', 462.5), ('U', 465.6), ('V', 468.8), ('W', 471.9),
    ('X', 475.0), ('Y', 478.1), ('Z', 481.2), ('a', 484.4), ('b', 487.5), ('c', 490.6),
    ('d', 493.8), ('e', 496.9), ('f', 500.0), ('g', 503.1), ('h', 506.2), ('i', 509.4),
    ('j', 512.5), ('k', 515.6), ('l', 518.8), ('m', 521.9), ('n', 525.0), ('o', 528.1),
    ('p', 531.2), ('q', 534.4), ('r', 537.5), ('s', 540.6), ('t', 543.8), ('u', 546.9),
    ('v', 550.0), ('w', 553.1), ('x', 556.2), ('y', 559.4), ('z', 562.5), ('0', 565.6),
    ('1', 568.8), ('2', 571.9), ('3', 575.0), ('4', 578.1), ('5', 581.2), ('6', 584.4),
    ('7', 587.5), ('8', 590.6), ('9', 593.8), ('.', 596.9), (',', 600.0), ('!', 603.1),
    ('?', 606.2), (';', 609.4), (':', 612.5), ('\'', 615.6), ('"', 618.8), ('-', 621.9),
    ('_', 625.0), ('(', 628.1), (')', 631.2), ('[', 634.4), (']', 637.5), ('{', 640.6),
    ('}', 643.8), ('<', 646.9), ('>', 650.0), ('+', 653.1), ('=', 656.2), ('*', 659.4),
    ('/', 662.5), ('%', 665.6), ('&', 668.8), ('|', 671.9), ('^', 675.0), ('~', 678.1),
    ('@', 681.2), ('#', 684.4), ('$', 687.5), ('\\', 690.6), ('`', 693.8), ('\n', 696.9),
    ('\t', 700.0),
];

/// Entrée de la table pour `c`, si elle existe.
pub fn lookup(c: char) -> Option<f64> {
    CHAR_WAVELENGTHS.iter().find(|(k, _)| *k == c).map(|(_, wl)| *wl)
}

/// Longueur d'onde d'un caractère, ou [`DEFAULT_WAVELENGTH`].
pub fn wavelength_of(c: char) -> f64 {
    lookup(c).unwrap_or(DEFAULT_WAVELENGTH)
}

/// Longueur d'onde du **premier** caractère d'un texte ; texte vide → défaut.
pub fn wavelength_of_text(text: &str) -> f64 {
    text.chars().next().map_or(DEFAULT_WAVELENGTH, wavelength_of)
}

/// Caractère le plus proche dans `table` (écart absolu minimal).
///
/// À égalité, la première entrée rencontrée gagne. Une longueur d'onde NaN
/// renvoie la première entrée. `None` seulement si la table est vide.
pub fn nearest_char_in(table: &[(char, f64)], wavelength: f64) -> Option<char> {
    let mut best: Option<(char, f64)> = None;
    for &(c, wl) in table {
        let dist = (wl - wavelength).abs();
        let closer = match best {
            None => true,
            Some((_, d)) => dist < d,
        };
        if closer {
            best = Some((c, dist));
        }
    }
    best.map(|(c, _)| c)
}

/// Caractère de la table de référence le plus proche de `wavelength`.
pub fn nearest_char(wavelength: f64) -> char {
    nearest_char_in(CHAR_WAVELENGTHS, wavelength).unwrap_or(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_increasing() {
        assert!(CHAR_WAVELENGTHS.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn lookups() {
        assert_eq!(wavelength_of('A'), 403.1);
        assert_eq!(wavelength_of('é'), DEFAULT_WAVELENGTH);
        assert_eq!(wavelength_of_text(""), DEFAULT_WAVELENGTH);
        assert_eq!(wavelength_of_text("photon"), wavelength_of('p'));
        assert_eq!(nearest_char(403.0), 'A');
        assert_eq!(nearest_char(10_000.0), '\t');
        assert_eq!(nearest_char(f64::NAN), ' ');
    }

    #[test]
    fn ties_go_to_first_definition() {
        let table = [('x', 1.0), ('y', 3.0), ('z', 3.0)];
        assert_eq!(nearest_char_in(&table, 2.0), Some('x'));
        assert_eq!(nearest_char_in(&table, 3.0), Some('y'));
        assert_eq!(nearest_char_in(&[], 3.0), None);
    }
}
