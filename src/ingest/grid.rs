use anyhow::Context;
use csv::ReaderBuilder;

/// Grille 2D brute : tout est texte, largeur libre par ligne.
pub type Grid = Vec<Vec<String>>;

/// Charge des octets CSV en grille, sans en-tête. Les lignes vides sont
/// ignorées par le lecteur, les largeurs inégales sont conservées.
pub fn read_grid(raw: &[u8]) -> anyhow::Result<Grid> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw);
    let mut grid = Vec::new();
    for rec in rdr.records() {
        let rec = rec.context("reading timetable row")?;
        grid.push(rec.iter().map(|c| c.trim().to_string()).collect());
    }
    Ok(grid)
}

/// Accès borné : chaîne vide hors de la grille.
pub fn cell(grid: &Grid, row: usize, col: usize) -> &str {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}
