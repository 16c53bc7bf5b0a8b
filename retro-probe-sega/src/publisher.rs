//! Mega Drive publisher lookup.
//!
//! Cartridge headers name the publisher inside the copyright notice at 0x110,
//! usually as `(C)SEGA` or, for licensees with a numeric code, `(C)T-XX`.
//! Modem-capable titles repeat the code in the modem block.

/// Look up a publisher from the 4 characters that follow the `(C)` mark.
///
/// A numeric licensee code sits after the last hyphen (`T-12` means code
/// `12`); trailing spaces are ignored. Unknown codes yield an empty string.
pub fn publisher_name(code: &str) -> &'static str {
    let code: String = code.chars().take(4).collect();
    let code = match code.rfind('-') {
        Some(i) => &code[i + 1..],
        None => code.as_str(),
    };
    licensee_name(code.trim_end()).unwrap_or("")
}

fn licensee_name(code: &str) -> Option<&'static str> {
    match code {
        "ACLD" => Some("Ballistic"),
        "RSI" => Some("Razorsoft"),
        "SEGA" => Some("SEGA"),
        "TREC" => Some("Treco"),
        "VRGN" => Some("Virgin Games"),
        "WSTN" => Some("Westone"),
        "10" => Some("Takara"),
        "11" => Some("Taito or Accolade"),
        "12" => Some("Capcom"),
        "13" => Some("Data East"),
        "14" => Some("Namco or Tengen"),
        "15" => Some("Sunsoft"),
        "16" => Some("Bandai"),
        "17" => Some("Dempa"),
        "18" => Some("Technosoft"),
        "19" => Some("Technosoft"),
        "20" => Some("Asmik"),
        "22" => Some("Micronet"),
        "23" => Some("Vic Tokai"),
        "24" => Some("American Sammy"),
        "29" => Some("Kyugo"),
        "32" => Some("Wolfteam"),
        "33" => Some("Kaneko"),
        "35" => Some("Toaplan"),
        "36" => Some("Tecmo"),
        "40" => Some("Toaplan"),
        "42" => Some("UFL Company Limited"),
        "43" => Some("Human"),
        "45" => Some("Game Arts"),
        "47" => Some("Sage's Creation"),
        "48" => Some("Tengen"),
        "49" => Some("Renovation or Telenet"),
        "50" => Some("Electronic Arts"),
        "56" => Some("Razorsoft"),
        "58" => Some("Mentrix"),
        "60" => Some("Victor Musical Ind."),
        "69" => Some("Arena"),
        "70" => Some("Virgin"),
        "73" => Some("Soft Vision"),
        "74" => Some("Palsoft"),
        "76" => Some("Koei"),
        "79" => Some("U.S. Gold"),
        "81" => Some("Acclaim/Flying Edge"),
        "83" => Some("Gametek"),
        "86" => Some("Absolute"),
        "87" => Some("Mindscape"),
        "93" => Some("Sony"),
        "95" => Some("Konami"),
        "97" => Some("Tradewest"),
        "100" => Some("T*HQ Software"),
        "101" => Some("Tecmagik"),
        "112" => Some("Designer Software"),
        "113" => Some("Psygnosis"),
        "119" => Some("Accolade"),
        "120" => Some("Code Masters"),
        "125" => Some("Interplay"),
        "130" => Some("Activision"),
        "132" => Some("Shiny & Playmates"),
        "144" => Some("Atlus"),
        "151" => Some("Infogrames"),
        "161" => Some("Fox Interactive"),
        "177" => Some("Ubisoft"),
        "239" => Some("Disney Interactive"),
        _ => None,
    }
}
