//! Text rendering shared by the command line and the MCP server.
//!
//! Everything here returns a `String`; the callers decide where it goes.

use crate::movesets::{MovesetPath, SearchRequest};
use crate::pokedex::Pokedex;
use schema::SpeciesRecord;

/// Printed when a valid request has no path at all.
pub const NO_SOLUTION: &str = "no legal combination found";

/// One-line summary of what is being asked, e.g. `Pikachu (level 100) in black-white: Volt Tackle`.
pub fn describe_request(pokedex: &Pokedex, request: &SearchRequest) -> String {
    let moves: Vec<String> = request.moves.iter().map(|&m| pokedex.move_name(m)).collect();
    let mut output = format!(
        "{} (level {}) in {}: {}",
        pokedex.species_name(request.species),
        request.level,
        pokedex.version_group_name(request.version_group),
        moves.join(", ")
    );
    if !request.excluded_version_groups.is_empty() {
        let excluded: Vec<String> = request
            .excluded_version_groups
            .iter()
            .map(|&vg| pokedex.version_group_name(vg))
            .collect();
        output.push_str(&format!("\n  excluding games: {}", excluded.join(", ")));
    }
    if !request.excluded_species.is_empty() {
        let excluded: Vec<String> = request
            .excluded_species
            .iter()
            .map(|&s| pokedex.species_name(s))
            .collect();
        output.push_str(&format!("\n  excluding families of: {}", excluded.join(", ")));
    }
    output
}

/// Numbered steps of one path with their running cost.
pub fn render_path(pokedex: &Pokedex, path: &MovesetPath) -> String {
    let mut output = String::new();
    for (i, step) in path.steps().iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {:<60} [{}]\n",
            i + 1,
            step.transition.describe(pokedex),
            step.cost
        ));
    }
    output.push_str(&format!("Total cost: {}\n", path.cost()));
    output
}

/// The request followed by every path found, or [`NO_SOLUTION`].
pub fn render_outcome(pokedex: &Pokedex, request: &SearchRequest, paths: &[MovesetPath]) -> String {
    let mut output = describe_request(pokedex, request);
    output.push('\n');
    if paths.is_empty() {
        output.push_str(NO_SOLUTION);
        output.push('\n');
        return output;
    }
    for (i, path) in paths.iter().enumerate() {
        if paths.len() > 1 {
            output.push_str(&format!("--- Option {} ---\n", i + 1));
        }
        output.push_str(&render_path(pokedex, path));
    }
    output
}

/// Details of a species: family, breeding data and the games it appears in.
pub fn lookup_pokemon(pokedex: &Pokedex, identifier: &str) -> String {
    if identifier.trim().is_empty() {
        return "What Pokemon do you want to look up? (e.g., 'pikachu')".to_string();
    }
    match pokedex.species_by_identifier(identifier.trim()) {
        Ok(species) => format_species(pokedex, species),
        Err(e) => e.to_string(),
    }
}

fn format_species(pokedex: &Pokedex, species: &SpeciesRecord) -> String {
    let mut output = format!("--- {} (#{}) ---\n", species.name, species.id);

    let family: Vec<String> = pokedex
        .family_members(species.evolution_chain)
        .iter()
        .map(|&id| pokedex.species_name(id))
        .collect();
    output.push_str(&format!("Family: {}\n", family.join(", ")));
    if let Some(parent) = species.evolves_from {
        output.push_str(&format!("Evolves from: {}\n", pokedex.species_name(parent)));
    }

    let groups: Vec<String> = pokedex
        .egg_groups()
        .filter(|g| species.egg_groups.contains(&g.id))
        .map(|g| g.identifier.clone())
        .collect();
    output.push_str(&format!("Egg groups: {}\n", groups.join(", ")));
    let rate = pokedex.gender_rate(species.evolution_chain);
    let gender = if rate.is_genderless() {
        "genderless".to_string()
    } else {
        format!("{}/8 female", rate.0)
    };
    output.push_str(&format!("Gender: {}\n", gender));
    output.push_str(&format!("Egg cycles: {}\n", species.hatch_counter));

    let games: Vec<String> = pokedex
        .version_groups()
        .filter(|vg| pokedex.is_available(species.id, vg.id))
        .map(|vg| vg.identifier.clone())
        .collect();
    output.push_str(&format!("Appears in: {}\n", games.join(", ")));
    output
}

/// Every version group with its versions, grouped by generation.
pub fn list_versions(pokedex: &Pokedex) -> String {
    let mut groups: Vec<_> = pokedex.version_groups().collect();
    groups.sort_by_key(|vg| (vg.generation, vg.id));

    let mut output = String::from("Available Versions:\n");
    for vg in groups {
        output.push_str(&format!(
            "  Gen {}: {} ({})\n",
            vg.generation,
            vg.identifier,
            vg.versions.join(", ")
        ));
    }
    output
}
