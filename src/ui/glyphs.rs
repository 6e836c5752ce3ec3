#[derive(Clone, Copy, Debug)]
pub struct Glyphs {
    pub planchette: &'static str,
    pub arrow: &'static str,
    pub cursor: &'static str,
    pub active_left: &'static str,
    pub active_right: &'static str,
    pub error_prefix: &'static str,
    pub audio: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        planchette: "o",
        arrow: "->",
        cursor: "_",
        active_left: "[",
        active_right: "]",
        error_prefix: "x Erro:",
        audio: "~",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        planchette: "◉",
        arrow: "→",
        cursor: "█",
        active_left: "❰",
        active_right: "❱",
        error_prefix: "❌ Erro:",
        audio: "♪",
    }
}
