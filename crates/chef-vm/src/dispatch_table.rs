//! Maps a method statement's verb token to the operator that implements
//! it (spec §4.3/§4.4, §9 re-architecture guidance: "a map from verb
//! string to operator function"). Any verb outside this closed set is
//! interpreted as an arbitrary loop header, except the two verbs the
//! spec explicitly never implements.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Put,
    Fold,
    Add,
    Remove,
    Combine,
    Divide,
    Liquefy,
    Stir,
    Clean,
    Pour,
    SetAside,
    ServeWith,
    Refrigerate,
    Take,
    Mix,
    LoopHeader,
}

/// Classify a method statement's first token.
pub fn classify(first_token: &str, second_token: Option<&str>) -> Verb {
    match first_token {
        "Put" => Verb::Put,
        "Fold" => Verb::Fold,
        "Add" => Verb::Add,
        "Remove" => Verb::Remove,
        "Combine" => Verb::Combine,
        "Divide" => Verb::Divide,
        "Liquefy" => Verb::Liquefy,
        "Stir" => Verb::Stir,
        "Clean" => Verb::Clean,
        "Pour" => Verb::Pour,
        "Take" => Verb::Take,
        "Mix" => Verb::Mix,
        "Set" if second_token == Some("aside") => Verb::SetAside,
        "Serve" if second_token == Some("with") => Verb::ServeWith,
        "Refrigerate" => Verb::Refrigerate,
        _ => Verb::LoopHeader,
    }
}
