//! Builtin valence table.
//!
//! Mean human valence ratings on a -4..=4 scale, in the format of the VADER
//! lexicon. Deployments that need full coverage point `fallback.lexicon_path`
//! at a complete lexicon file instead.

pub(crate) const BUILTIN_LEXICON: &[(&str, f64)] = &[
    // positive
    ("accomplished", 1.8),
    ("achievement", 2.2),
    ("admire", 2.1),
    ("adore", 2.6),
    ("agree", 1.5),
    ("amazing", 2.8),
    ("amused", 1.6),
    ("appreciate", 1.7),
    ("appreciated", 2.3),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("beloved", 2.3),
    ("benefit", 2.0),
    ("best", 3.2),
    ("better", 1.9),
    ("blessed", 2.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("care", 2.2),
    ("celebrate", 2.7),
    ("charming", 2.8),
    ("cheerful", 2.5),
    ("clean", 1.7),
    ("clever", 2.0),
    ("comfortable", 2.3),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("cool", 1.3),
    ("delighted", 2.7),
    ("delightful", 2.9),
    ("eager", 1.5),
    ("easy", 1.9),
    ("ecstatic", 2.3),
    ("efficient", 1.8),
    ("elegant", 2.1),
    ("encouraging", 2.4),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("enjoying", 2.4),
    ("excellence", 3.1),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fabulous", 2.4),
    ("fair", 1.3),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fortunate", 1.9),
    ("free", 2.3),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("funny", 1.9),
    ("generous", 2.3),
    ("gentle", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happiness", 2.6),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("hero", 2.6),
    ("honest", 2.3),
    ("honor", 2.2),
    ("hope", 1.9),
    ("hopeful", 1.6),
    ("ideal", 2.4),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("inspired", 2.2),
    ("inspiring", 2.2),
    ("intelligent", 2.0),
    ("interesting", 1.7),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("kind", 2.4),
    ("laugh", 2.6),
    ("like", 1.5),
    ("liked", 1.8),
    ("likes", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loves", 2.7),
    ("loving", 2.9),
    ("lucky", 1.8),
    ("magnificent", 3.3),
    ("marvelous", 2.9),
    ("merry", 2.5),
    ("miracle", 2.8),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("optimistic", 1.3),
    ("outstanding", 3.0),
    ("passion", 2.0),
    ("passionate", 2.4),
    ("peace", 2.5),
    ("peaceful", 2.2),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("popular", 1.8),
    ("positive", 2.6),
    ("praise", 2.6),
    ("pretty", 2.2),
    ("proud", 2.1),
    ("recommend", 1.5),
    ("relaxed", 2.2),
    ("relief", 2.1),
    ("reliable", 1.9),
    ("rich", 2.6),
    ("romantic", 2.3),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("satisfying", 2.0),
    ("secure", 1.4),
    ("smart", 1.7),
    ("smile", 1.5),
    ("smiling", 2.1),
    ("splendid", 2.8),
    ("strong", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("superb", 3.1),
    ("support", 1.7),
    ("supportive", 1.2),
    ("sweet", 2.0),
    ("talented", 2.3),
    ("terrific", 2.1),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("thrilled", 1.9),
    ("triumph", 2.1),
    ("true", 1.8),
    ("trust", 2.3),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("welcome", 2.0),
    ("win", 2.8),
    ("winning", 2.4),
    ("wise", 1.8),
    ("won", 2.7),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("wow", 2.8),
    ("yay", 2.4),
    ("yes", 1.7),
    // negative
    ("abuse", -3.2),
    ("afraid", -2.2),
    ("anger", -2.7),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("ashamed", -2.1),
    ("attack", -2.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bored", -1.1),
    ("boring", -1.3),
    ("broken", -1.8),
    ("careless", -1.5),
    ("complain", -1.5),
    ("confused", -1.3),
    ("confusing", -1.3),
    ("crap", -1.6),
    ("crash", -1.7),
    ("crisis", -3.1),
    ("cruel", -2.8),
    ("cry", -2.1),
    ("crying", -2.1),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("dead", -3.3),
    ("death", -2.9),
    ("delay", -1.3),
    ("depressed", -2.3),
    ("depressing", -1.6),
    ("die", -2.9),
    ("died", -2.6),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappointment", -2.3),
    ("disaster", -3.1),
    ("disgust", -2.9),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("dumb", -2.3),
    ("embarrassed", -1.5),
    ("embarrassing", -1.6),
    ("error", -1.7),
    ("evil", -3.4),
    ("exhausted", -1.5),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fails", -1.8),
    ("failure", -2.3),
    ("fear", -2.2),
    ("frustrated", -1.9),
    ("frustrating", -1.9),
    ("frustration", -2.1),
    ("furious", -2.7),
    ("grief", -2.2),
    ("gross", -2.1),
    ("guilty", -1.8),
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("hating", -2.3),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("hurts", -2.1),
    ("idiot", -2.3),
    ("ill", -1.8),
    ("inferior", -1.7),
    ("kill", -3.7),
    ("killed", -3.5),
    ("lame", -1.8),
    ("liar", -2.2),
    ("lie", -1.6),
    ("lies", -1.8),
    ("lonely", -1.5),
    ("lose", -1.7),
    ("losing", -1.6),
    ("loss", -1.3),
    ("lost", -1.3),
    ("mad", -2.2),
    ("mediocre", -1.0),
    ("miserable", -2.2),
    ("misery", -2.7),
    ("nasty", -2.6),
    ("negative", -1.6),
    ("no", -1.2),
    ("outrage", -2.3),
    ("outraged", -2.5),
    ("pain", -2.3),
    ("painful", -1.9),
    ("panic", -2.3),
    ("pathetic", -2.4),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("regret", -1.8),
    ("reject", -1.7),
    ("rejected", -2.3),
    ("ridiculous", -1.1),
    ("rude", -2.0),
    ("ruin", -2.8),
    ("ruined", -2.4),
    ("sad", -2.1),
    ("scared", -1.9),
    ("scary", -2.2),
    ("shame", -2.1),
    ("sick", -2.3),
    ("sorry", -0.3),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("stupid", -2.4),
    ("suck", -1.9),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("threat", -2.4),
    ("tired", -1.9),
    ("tragedy", -3.4),
    ("tragic", -3.4),
    ("ugly", -2.3),
    ("unfair", -2.1),
    ("unfortunately", -1.4),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useless", -1.8),
    ("violent", -2.9),
    ("war", -2.9),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("weak", -1.9),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];
