/// Terminal glyph for a host icon identifier (`fa-*` names).
/// Unknown identifiers get the star, same as a missing icon.
pub fn glyph(icon: &str) -> &'static str {
    let name = icon.trim().trim_start_matches("fas ").trim_start_matches("fa-");
    match name {
        "star" => "\u{2605}",                        // ★
        "crown" => "\u{265b}",                       // ♛
        "skull" | "skull-crossbones" => "\u{2620}",  // ☠
        "heart" => "\u{2665}",                       // ♥
        "gem" | "diamond" => "\u{25c6}",             // ◆
        "shield" | "shield-alt" => "\u{25d8}",       // ◘
        "fire" | "fire-alt" => "\u{2668}",           // ♨
        "bolt" => "\u{03df}",                        // ϟ
        "leaf" | "cannabis" => "\u{2618}",           // ☘
        "money-bill" | "dollar-sign" | "coins" => "$",
        "gun" | "crosshairs" => "\u{2316}",          // ⌖
        "handshake" => "\u{2726}",                   // ✦
        "car" => "\u{25b0}",                         // ▰
        "flag" => "\u{2691}",                        // ⚑
        _ => "\u{2605}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_fallback_glyphs() {
        assert_eq!(glyph("fa-crown"), "\u{265b}");
        assert_eq!(glyph("fa-dollar-sign"), "$");
        assert_eq!(glyph("fa-not-a-thing"), glyph("fa-star"));
        assert_eq!(glyph(""), "\u{2605}");
    }
}
