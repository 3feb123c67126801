//! Dictionary-backed lemmatizer for English research prose.
//!
//! Irregular forms are looked up first; anything not listed goes through
//! conservative plural and `-ied` rules. Regular `-ing`/`-ed` forms are left
//! alone: without a full lexicon, stripping them mangles more words
//! (imaging, sequencing) than it merges.

/// Irregular or rule-breaking forms and their base form.
const EXCEPTIONS: &[(&str, &str)] = &[
    // Latin and Greek plurals common in the sciences.
    ("algae", "alga"),
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("bacteria", "bacterium"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("diagnoses", "diagnosis"),
    ("fungi", "fungus"),
    ("genera", "genus"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("larvae", "larva"),
    ("loci", "locus"),
    ("matrices", "matrix"),
    ("mitochondria", "mitochondrion"),
    ("nuclei", "nucleus"),
    ("phenomena", "phenomenon"),
    ("stimuli", "stimulus"),
    ("syntheses", "synthesis"),
    ("theses", "thesis"),
    ("vertebrae", "vertebra"),
    ("viruses", "virus"),
    // Irregular English plurals.
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("wolves", "wolf"),
    // Plurals of nouns ending in -ie.
    ("calories", "calorie"),
    ("cookies", "cookie"),
    ("movies", "movie"),
    ("zombies", "zombie"),
    ("women", "woman"),
    // Irregular verb forms.
    ("began", "begin"),
    ("begun", "begin"),
    ("brought", "bring"),
    ("built", "build"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("did", "do"),
    ("does", "do"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("held", "hold"),
    ("led", "lead"),
    ("taught", "teach"),
    ("thought", "think"),
    ("took", "take"),
    ("taken", "take"),
    ("won", "win"),
    ("wrote", "write"),
    ("written", "write"),
    // Words that look plural but are not.
    ("atlas", "atlas"),
    ("bias", "bias"),
    ("canvas", "canvas"),
    ("chaos", "chaos"),
    ("diabetes", "diabetes"),
    ("lens", "lens"),
    ("rabies", "rabies"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
];

/// Endings that mark a word as already singular.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ics", "ous", "sis"];

/// Reduce a lowercase token to its base form.
///
/// # Examples
///
/// ```
/// use faculty_search::text::lemma::lemmatize;
///
/// assert_eq!(lemmatize("proteins"), "protein");
/// assert_eq!(lemmatize("studies"), "study");
/// assert_eq!(lemmatize("hypotheses"), "hypothesis");
/// assert_eq!(lemmatize("genetics"), "genetics");
/// ```
pub fn lemmatize(token: &str) -> String {
    if let Some((_, base)) = EXCEPTIONS.iter().find(|(form, _)| *form == token) {
        return (*base).to_owned();
    }

    let chars = token.chars().count();
    if chars <= 3 || !token.is_ascii() {
        return token.to_owned();
    }

    if SINGULAR_ENDINGS.iter().any(|end| token.ends_with(end)) {
        return token.to_owned();
    }

    if let Some(stem) = token.strip_suffix("ies") {
        if chars > 4 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = token.strip_suffix("ied") {
        if chars > 4 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = token.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    for suffix in ["xes", "ches", "shes", "zzes"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            let kept = &suffix[..suffix.len() - 2];
            return format!("{stem}{kept}");
        }
    }
    if let Some(stem) = token.strip_suffix('s') {
        return stem.to_owned();
    }

    token.to_owned()
}
