//! Classification heuristique des cellules de la grille.
//!
//! Le prédicat central est [`is_teacher_name_cell`] : il préfère rater un
//! bloc plutôt que d'en inventer un, et chaque exclusion est une fonction
//! pure testable isolément.

use crate::model::Weekday;

const BREAK_MARKERS: [&str; 2] = ["BREAK", "LUNCH"];
const ROLE_MARKERS: [&str; 2] = ["HRT", "NON-HRT"];
/// Mots d'activités non enseignantes : jamais des noms de personnes,
/// seuls ou combinés (« DANCE CLUB »).
const ACTIVITY_WORDS: [&str; 10] = [
    "READING", "LIBRARY", "ART", "MUSIC", "DANCE", "GAMES", "SPORT", "PE", "CLUB", "ASSEMBLY",
];

pub fn is_weekday(cell: &str) -> bool {
    cell.trim().parse::<Weekday>().is_ok()
}

/// Vrai si la cellule contient un motif d'heure : 1-2 chiffres, « : » ou
/// « . » (artefact décimal), puis au moins deux chiffres.
pub fn looks_like_time(cell: &str) -> bool {
    let b = cell.as_bytes();
    for i in 0..b.len() {
        if b[i] != b':' && b[i] != b'.' {
            continue;
        }
        let before = b[..i].iter().rev().take_while(|c| c.is_ascii_digit()).count();
        let after = b[i + 1..].iter().take_while(|c| c.is_ascii_digit()).count();
        if (1..=2).contains(&before) && after >= 2 {
            return true;
        }
    }
    false
}

/// Code de classe nu : chiffres puis lettres, variantes « / » tolérées
/// (« 3A », « 6B/C »). Les annotations parenthésées sont ignorées avant le
/// test pour que « 3A (Games) » reste un code de classe.
pub fn is_class_code(cell: &str) -> bool {
    let cleaned = strip_parens(cell);
    let cleaned = cleaned.trim();
    if !cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    cleaned.split('/').all(|part| is_code_part(part.trim()))
}

fn is_code_part(part: &str) -> bool {
    !part.is_empty()
        && part.len() <= 3
        && part.chars().all(|c| c.is_ascii_alphanumeric())
        && part
            .chars()
            .skip_while(|c| c.is_ascii_digit())
            .all(|c| c.is_ascii_alphabetic())
}

pub fn is_break_marker(cell: &str) -> bool {
    let up = cell.to_ascii_uppercase();
    BREAK_MARKERS.iter().any(|m| up.contains(m))
}

/// Vrai si un mot de la cellule est une activité connue (comparaison par
/// mot entier : « ARTHUR » ne déclenche pas « ART »).
pub fn mentions_activity(cell: &str) -> bool {
    cell.split_whitespace().any(|w| {
        let w = w
            .trim_matches(|c: char| !c.is_ascii_alphanumeric())
            .to_ascii_uppercase();
        ACTIVITY_WORDS.contains(&w.as_str())
    })
}

/// Cellule de données qui ne doit jamais devenir une période : pause ou
/// simple marqueur de rôle.
pub fn is_noise_cell(cell: &str) -> bool {
    let up = cell.trim().to_ascii_uppercase();
    is_break_marker(&up) || ROLE_MARKERS.contains(&up.as_str())
}

/// La cellule peut-elle ancrer un bloc enseignant ?
///
/// Exclusions : vide, jour de semaine, motif horaire, code de classe,
/// activité, pause. Ce qui reste doit se résoudre en nom multi-mots après
/// nettoyage, ou porter explicitement le marqueur de rôle « HRT ».
pub fn is_teacher_name_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    if is_weekday(trimmed)
        || looks_like_time(trimmed)
        || is_class_code(trimmed)
        || is_break_marker(trimmed)
        || mentions_activity(trimmed)
    {
        return false;
    }
    if trimmed.to_ascii_uppercase().contains("HRT") {
        return true;
    }
    clean_teacher_name(trimmed).split_whitespace().count() >= 2
}

/// Nettoie un nom d'enseignant : annotations parenthésées, marqueurs
/// HRT/NON-HRT (avec tiret et code de classe éventuels), partie après une
/// virgule, suffixes « - codes » et codes « /X » incrustés.
pub fn clean_teacher_name(raw: &str) -> String {
    let s = strip_parens(raw);
    let s = s.replace("NON-HRT", " ");
    let s = strip_hrt(&s);
    let s = s.split(',').next().unwrap_or("").to_string();
    let s = strip_trailing_codes(&s);
    let s = strip_slash_codes(&s);
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_parens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn strip_hrt(s: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut tokens = s.split_whitespace().peekable();
    while let Some(tok) = tokens.next() {
        if tok.eq_ignore_ascii_case("HRT") || tok.eq_ignore_ascii_case("HRT-") {
            // tiret et code de classe optionnels à la suite
            if let Some(&next) = tokens.peek() {
                if next == "-" {
                    tokens.next();
                    if let Some(&code) = tokens.peek() {
                        if is_class_code(code) {
                            tokens.next();
                        }
                    }
                } else if is_class_code(next) {
                    tokens.next();
                }
            }
            continue;
        }
        // forme collée « HRT-3A »
        if let Some(rest) = tok
            .strip_prefix("HRT-")
            .or_else(|| tok.strip_prefix("hrt-"))
        {
            if is_class_code(rest) {
                continue;
            }
        }
        out.push(tok);
    }
    out.join(" ")
}

fn strip_trailing_codes(s: &str) -> String {
    if let Some((head, tail)) = s.rsplit_once('-') {
        let tail = tail.trim();
        if !head.trim().is_empty()
            && !tail.is_empty()
            && tail.split_whitespace().all(is_class_code)
        {
            return head.trim().to_string();
        }
    }
    s.trim().to_string()
}

fn strip_slash_codes(s: &str) -> String {
    s.split_whitespace()
        .filter_map(|tok| {
            let head = tok.split('/').next().unwrap_or("");
            if head.is_empty() {
                None
            } else {
                Some(head)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Synthèse d'email : clé naturelle d'un enseignant entre deux imports.
/// Minuscules, espaces supprimés, alphabet restreint à `[a-z0-9._-]`,
/// « . » et « - » rognés aux extrémités, « teacher » en dernier recours.
pub fn synthesize_email(name: &str, domain: &str) -> String {
    let local: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
        .collect();
    let local = local.trim_matches(|c| c == '.' || c == '-');
    let local = if local.is_empty() { "teacher" } else { local };
    format!("{local}@{domain}")
}
