//! Built-in question bank.
//!
//! The bank is fixed at compile time; sessions draw a random subset of it.
//! Entries live here as plain tuples so adding a question is a one-line
//! edit, and the constructor check in [`builtin`] plus the tests below keep
//! the data honest.

use crate::model::{Question, QuestionId};

/// `(id, prompt, options, correct option index, optional explanation)`
type RawQuestion = (
    &'static str,
    &'static str,
    [&'static str; 4],
    usize,
    Option<&'static str>,
);

const BANK: &[RawQuestion] = &[
    (
        "B01",
        "Which organelle is known as the powerhouse of the cell?",
        ["Ribosome", "Mitochondrion", "Golgi apparatus", "Lysosome"],
        1,
        Some("Mitochondria produce most of the cell's ATP through aerobic respiration."),
    ),
    (
        "B02",
        "Which molecule carries hereditary information in most organisms?",
        ["RNA", "Protein", "DNA", "Lipid"],
        2,
        None,
    ),
    (
        "B03",
        "Photosynthesis primarily takes place in which part of a plant cell?",
        ["Chloroplast", "Nucleus", "Cell wall", "Vacuole"],
        0,
        Some("Chlorophyll inside the chloroplast absorbs the light that drives the reaction."),
    ),
    (
        "B04",
        "Which blood cells defend the body against infection?",
        ["Red blood cells", "White blood cells", "Platelets", "Hemoglobin"],
        1,
        None,
    ),
    (
        "B05",
        "What is the basic structural unit of all living things?",
        ["Atom", "Molecule", "Cell", "Tissue"],
        2,
        None,
    ),
    (
        "B06",
        "Which process divides a body cell into two identical daughter cells?",
        ["Meiosis", "Mitosis", "Fertilization", "Budding"],
        1,
        Some("Meiosis halves the chromosome number; mitosis copies it."),
    ),
    (
        "B07",
        "Which gas do plants take in from the atmosphere for photosynthesis?",
        ["Oxygen", "Nitrogen", "Carbon dioxide", "Hydrogen"],
        2,
        None,
    ),
    (
        "B08",
        "Where in the cell does protein synthesis occur?",
        ["Ribosome", "Nucleolus", "Mitochondrion", "Vacuole"],
        0,
        None,
    ),
    (
        "B09",
        "Which macromolecule is the body's main source of quick energy?",
        ["Protein", "Carbohydrate", "Lipid", "Nucleic acid"],
        1,
        None,
    ),
    (
        "B10",
        "What is the main function of red blood cells?",
        [
            "Fight infection",
            "Clot blood",
            "Transport oxygen",
            "Produce hormones",
        ],
        2,
        Some("Hemoglobin binds oxygen in the lungs and releases it in the tissues."),
    ),
    (
        "B11",
        "Which organ filters waste products out of the blood?",
        ["Liver", "Kidney", "Spleen", "Pancreas"],
        1,
        None,
    ),
    (
        "B12",
        "DNA replication is best described as:",
        ["Conservative", "Semi-conservative", "Dispersive", "Random"],
        1,
        Some("Each daughter helix keeps one parental strand."),
    ),
    (
        "B13",
        "Which part of a neuron receives incoming signals?",
        ["Axon", "Dendrite", "Myelin sheath", "Synapse"],
        1,
        None,
    ),
    (
        "B14",
        "Organisms that make their own food are called:",
        ["Heterotrophs", "Autotrophs", "Decomposers", "Parasites"],
        1,
        None,
    ),
    (
        "B15",
        "Which vitamin does human skin produce under sunlight?",
        ["Vitamin A", "Vitamin B12", "Vitamin C", "Vitamin D"],
        3,
        None,
    ),
    (
        "B16",
        "In DNA base pairing, adenine pairs with:",
        ["Guanine", "Cytosine", "Thymine", "Uracil"],
        2,
        None,
    ),
    (
        "B17",
        "Which structure controls what enters and leaves the cell?",
        ["Cell membrane", "Cytoplasm", "Nucleus", "Cell wall"],
        0,
        None,
    ),
    (
        "B18",
        "Enzymes are best described as:",
        [
            "Hormones",
            "Biological catalysts",
            "Energy stores",
            "Structural fibers",
        ],
        1,
        Some("They lower activation energy without being consumed by the reaction."),
    ),
    (
        "B19",
        "Mushrooms belong to which kingdom?",
        ["Plantae", "Animalia", "Fungi", "Protista"],
        2,
        None,
    ),
    (
        "B20",
        "What is the main role of the large intestine?",
        [
            "Absorb water",
            "Digest protein",
            "Produce bile",
            "Absorb oxygen",
        ],
        0,
        None,
    ),
    (
        "B21",
        "Natural selection acts directly on an organism's:",
        ["Genotype", "Phenotype", "Karyotype", "Genome"],
        1,
        Some("Selection sees expressed traits; allele frequencies shift as a consequence."),
    ),
    (
        "B22",
        "Which biome has the highest species diversity?",
        ["Tundra", "Desert", "Tropical rainforest", "Taiga"],
        2,
        None,
    ),
    (
        "B23",
        "Osmosis is the diffusion of:",
        ["Proteins", "Water", "Glucose", "Ions"],
        1,
        None,
    ),
    (
        "B24",
        "Which organelle packages and ships proteins out of the cell?",
        ["Golgi apparatus", "Ribosome", "Chloroplast", "Centriole"],
        0,
        None,
    ),
];

/// Materializes the built-in bank.
///
/// # Panics
///
/// Panics if a built-in entry is malformed; the tests below lock the data
/// down, so a panic here means an edit to `BANK` broke it.
#[must_use]
pub fn builtin() -> Vec<Question> {
    BANK.iter()
        .map(|(id, prompt, options, correct, explanation)| {
            Question::new(
                QuestionId::new(*id),
                *prompt,
                options.iter().map(|option| (*option).to_owned()).collect(),
                *correct,
                explanation.map(str::to_owned),
            )
            .expect("built-in bank entry should be well-formed")
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bank_covers_a_full_session() {
        assert!(builtin().len() >= 20);
    }

    #[test]
    fn bank_ids_are_unique() {
        let bank = builtin();
        let ids: HashSet<&str> = bank.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids.len(), bank.len());
    }

    #[test]
    fn every_entry_has_four_options() {
        for question in builtin() {
            assert_eq!(question.options().len(), 4, "{}", question.id());
        }
    }
}
