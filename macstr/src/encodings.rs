/*

Legacy text encodings
=====================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use std::env;
use std::fmt;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

/** A classic Mac OS text encoding, identified by its traditional numeric value.
    The ISO, DOS, Windows and EUC families are included so that modern encodings can be looked up in reverse.
*/
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u32)]
pub enum LegacyEncoding {
    #[default]
    MacRoman = 0,
    MacJapanese = 1,
    MacChineseTrad = 2,
    MacKorean = 3,
    MacArabic = 4,
    MacHebrew = 5,
    MacGreek = 6,
    MacCyrillic = 7,
    MacDevanagari = 9,
    MacGurmukhi = 10,
    MacGujarati = 11,
    MacOriya = 12,
    MacBengali = 13,
    MacTamil = 14,
    MacTelugu = 15,
    MacKannada = 16,
    MacMalayalam = 17,
    MacSinhalese = 18,
    MacBurmese = 19,
    MacKhmer = 20,
    MacThai = 21,
    MacLaotian = 22,
    MacGeorgian = 23,
    MacArmenian = 24,
    MacChineseSimp = 25,
    MacTibetan = 26,
    MacMongolian = 27,
    MacEthiopic = 28,
    MacCentralEurRoman = 29,
    MacVietnamese = 30,
    MacExtArabic = 31,
    MacSymbol = 33,
    MacDingbats = 34,
    MacTurkish = 35,
    MacCroatian = 36,
    MacIcelandic = 37,
    MacRomanian = 38,
    MacCeltic = 39,
    MacGaelic = 40,
    MacFarsi = 0x8C,
    MacUkrainian = 0x98,
    MacInuit = 0xEC,
    MacVT100 = 0xFC,
    MacHFS = 0xFF,

    IsoLatin1 = 0x0201,
    IsoLatin2 = 0x0202,
    IsoLatin3 = 0x0203,
    IsoLatin4 = 0x0204,
    IsoLatinCyrillic = 0x0205,
    IsoLatinArabic = 0x0206,
    IsoLatinGreek = 0x0207,
    IsoLatinHebrew = 0x0208,
    IsoLatin5 = 0x0209,
    IsoLatin6 = 0x020A,
    IsoLatinThai = 0x020B,
    IsoLatin7 = 0x020D,
    IsoLatin8 = 0x020E,
    IsoLatin9 = 0x020F,
    IsoLatin10 = 0x0210,

    DosLatinUS = 0x0400,
    DosLatin1 = 0x0410,
    DosLatin2 = 0x0412,
    DosCyrillic = 0x0413,
    DosRussian = 0x041B,
    DosThai = 0x041D,
    DosJapanese = 0x0420,
    DosChineseSimplif = 0x0421,
    DosKorean = 0x0422,
    DosChineseTrad = 0x0423,

    WindowsLatin1 = 0x0500,
    WindowsLatin2 = 0x0501,
    WindowsCyrillic = 0x0502,
    WindowsGreek = 0x0503,
    WindowsLatin5 = 0x0504,
    WindowsHebrew = 0x0505,
    WindowsArabic = 0x0506,
    WindowsBalticRim = 0x0507,
    WindowsVietnamese = 0x0508,

    Gb18030 = 0x0632,
    Iso2022Jp = 0x0820,
    EucJp = 0x0920,
    EucCn = 0x0930,
    EucKr = 0x0940,
    ShiftJis = 0x0A01,
    Koi8R = 0x0A02,
    Big5 = 0x0A03,
    Koi8U = 0x0A08,
}

use LegacyEncoding::*;

const ALL_ENCODINGS: [LegacyEncoding; 87] = [
    MacRoman, MacJapanese, MacChineseTrad, MacKorean, MacArabic, MacHebrew, MacGreek, MacCyrillic,
    MacDevanagari, MacGurmukhi, MacGujarati, MacOriya, MacBengali, MacTamil, MacTelugu, MacKannada,
    MacMalayalam, MacSinhalese, MacBurmese, MacKhmer, MacThai, MacLaotian, MacGeorgian, MacArmenian,
    MacChineseSimp, MacTibetan, MacMongolian, MacEthiopic, MacCentralEurRoman, MacVietnamese, MacExtArabic,
    MacSymbol, MacDingbats, MacTurkish, MacCroatian, MacIcelandic, MacRomanian, MacCeltic, MacGaelic,
    MacFarsi, MacUkrainian, MacInuit, MacVT100, MacHFS,
    IsoLatin1, IsoLatin2, IsoLatin3, IsoLatin4, IsoLatinCyrillic, IsoLatinArabic, IsoLatinGreek,
    IsoLatinHebrew, IsoLatin5, IsoLatin6, IsoLatinThai, IsoLatin7, IsoLatin8, IsoLatin9, IsoLatin10,
    DosLatinUS, DosLatin1, DosLatin2, DosCyrillic, DosRussian, DosThai, DosJapanese, DosChineseSimplif,
    DosKorean, DosChineseTrad,
    WindowsLatin1, WindowsLatin2, WindowsCyrillic, WindowsGreek, WindowsLatin5, WindowsHebrew,
    WindowsArabic, WindowsBalticRim, WindowsVietnamese,
    Gb18030, Iso2022Jp, EucJp, EucCn, EucKr, ShiftJis, Koi8R, Big5, Koi8U,
];

impl LegacyEncoding {
    /** Every known encoding, in raw value order */
    pub fn all() -> &'static [LegacyEncoding] {
        &ALL_ENCODINGS
    }

    pub fn from_raw(raw: u32) -> Option<LegacyEncoding> {
        ALL_ENCODINGS.iter().copied().find(|encoding| encoding.raw() == raw)
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    /** Whether this is one of the classic Mac OS script encodings, rather than a reverse lookup only encoding */
    pub fn is_mac(self) -> bool {
        self.raw() <= MacHFS.raw()
    }

    pub fn name(self) -> &'static str {
        match self {
            MacRoman => "Mac Roman",
            MacJapanese => "Mac Japanese",
            MacChineseTrad => "Mac Traditional Chinese",
            MacKorean => "Mac Korean",
            MacArabic => "Mac Arabic",
            MacHebrew => "Mac Hebrew",
            MacGreek => "Mac Greek",
            MacCyrillic => "Mac Cyrillic",
            MacDevanagari => "Mac Devanagari",
            MacGurmukhi => "Mac Gurmukhi",
            MacGujarati => "Mac Gujarati",
            MacOriya => "Mac Oriya",
            MacBengali => "Mac Bengali",
            MacTamil => "Mac Tamil",
            MacTelugu => "Mac Telugu",
            MacKannada => "Mac Kannada",
            MacMalayalam => "Mac Malayalam",
            MacSinhalese => "Mac Sinhalese",
            MacBurmese => "Mac Burmese",
            MacKhmer => "Mac Khmer",
            MacThai => "Mac Thai",
            MacLaotian => "Mac Laotian",
            MacGeorgian => "Mac Georgian",
            MacArmenian => "Mac Armenian",
            MacChineseSimp => "Mac Simplified Chinese",
            MacTibetan => "Mac Tibetan",
            MacMongolian => "Mac Mongolian",
            MacEthiopic => "Mac Ethiopic",
            MacCentralEurRoman => "Mac Central European Roman",
            MacVietnamese => "Mac Vietnamese",
            MacExtArabic => "Mac Extended Arabic",
            MacSymbol => "Mac Symbol",
            MacDingbats => "Mac Dingbats",
            MacTurkish => "Mac Turkish",
            MacCroatian => "Mac Croatian",
            MacIcelandic => "Mac Icelandic",
            MacRomanian => "Mac Romanian",
            MacCeltic => "Mac Celtic",
            MacGaelic => "Mac Gaelic",
            MacFarsi => "Mac Farsi",
            MacUkrainian => "Mac Ukrainian",
            MacInuit => "Mac Inuit",
            MacVT100 => "Mac VT100",
            MacHFS => "Mac HFS",
            IsoLatin1 => "ISO-8859-1",
            IsoLatin2 => "ISO-8859-2",
            IsoLatin3 => "ISO-8859-3",
            IsoLatin4 => "ISO-8859-4",
            IsoLatinCyrillic => "ISO-8859-5",
            IsoLatinArabic => "ISO-8859-6",
            IsoLatinGreek => "ISO-8859-7",
            IsoLatinHebrew => "ISO-8859-8",
            IsoLatin5 => "ISO-8859-9",
            IsoLatin6 => "ISO-8859-10",
            IsoLatinThai => "ISO-8859-11",
            IsoLatin7 => "ISO-8859-13",
            IsoLatin8 => "ISO-8859-14",
            IsoLatin9 => "ISO-8859-15",
            IsoLatin10 => "ISO-8859-16",
            DosLatinUS => "CP437",
            DosLatin1 => "CP850",
            DosLatin2 => "CP852",
            DosCyrillic => "CP855",
            DosRussian => "CP866",
            DosThai => "CP874",
            DosJapanese => "CP932",
            DosChineseSimplif => "CP936",
            DosKorean => "CP949",
            DosChineseTrad => "CP950",
            WindowsLatin1 => "Windows-1252",
            WindowsLatin2 => "Windows-1250",
            WindowsCyrillic => "Windows-1251",
            WindowsGreek => "Windows-1253",
            WindowsLatin5 => "Windows-1254",
            WindowsHebrew => "Windows-1255",
            WindowsArabic => "Windows-1256",
            WindowsBalticRim => "Windows-1257",
            WindowsVietnamese => "Windows-1258",
            Gb18030 => "GB 18030",
            Iso2022Jp => "ISO-2022-JP",
            EucJp => "EUC-JP",
            EucCn => "EUC-CN",
            EucKr => "EUC-KR",
            ShiftJis => "Shift_JIS",
            Koi8R => "KOI8-R",
            Big5 => "Big5",
            Koi8U => "KOI8-U",
        }
    }

    /** The converter used for byte <-> Unicode conversion, if one is available.
        The Mac CJK encodings are converted with their closest standard relatives.
    */
    pub fn text_encoding(self) -> Option<TextEncoding> {
        let encoding: &'static Encoding = match self {
            MacRoman => encoding_rs::MACINTOSH,
            MacCyrillic | MacUkrainian => encoding_rs::X_MAC_CYRILLIC,
            MacJapanese | ShiftJis | DosJapanese => encoding_rs::SHIFT_JIS,
            MacChineseTrad | Big5 | DosChineseTrad => encoding_rs::BIG5,
            MacKorean | EucKr | DosKorean => encoding_rs::EUC_KR,
            MacChineseSimp | EucCn | DosChineseSimplif => encoding_rs::GBK,
            IsoLatin1 | WindowsLatin1 => encoding_rs::WINDOWS_1252,
            IsoLatin2 => encoding_rs::ISO_8859_2,
            IsoLatin3 => encoding_rs::ISO_8859_3,
            IsoLatin4 => encoding_rs::ISO_8859_4,
            IsoLatinCyrillic => encoding_rs::ISO_8859_5,
            IsoLatinArabic => encoding_rs::ISO_8859_6,
            IsoLatinGreek => encoding_rs::ISO_8859_7,
            IsoLatinHebrew => encoding_rs::ISO_8859_8,
            IsoLatin5 | WindowsLatin5 => encoding_rs::WINDOWS_1254,
            IsoLatin6 => encoding_rs::ISO_8859_10,
            IsoLatinThai | DosThai => encoding_rs::WINDOWS_874,
            IsoLatin7 => encoding_rs::ISO_8859_13,
            IsoLatin8 => encoding_rs::ISO_8859_14,
            IsoLatin9 => encoding_rs::ISO_8859_15,
            IsoLatin10 => encoding_rs::ISO_8859_16,
            DosRussian => encoding_rs::IBM866,
            WindowsLatin2 => encoding_rs::WINDOWS_1250,
            WindowsCyrillic => encoding_rs::WINDOWS_1251,
            WindowsGreek => encoding_rs::WINDOWS_1253,
            WindowsHebrew => encoding_rs::WINDOWS_1255,
            WindowsArabic => encoding_rs::WINDOWS_1256,
            WindowsBalticRim => encoding_rs::WINDOWS_1257,
            WindowsVietnamese => encoding_rs::WINDOWS_1258,
            Gb18030 => encoding_rs::GB18030,
            Iso2022Jp => encoding_rs::ISO_2022_JP,
            EucJp => encoding_rs::EUC_JP,
            Koi8R => encoding_rs::KOI8_R,
            Koi8U => encoding_rs::KOI8_U,
            _ => return None,
        };
        Some(TextEncoding(encoding))
    }

    /** Find the classic Mac encoding most compatible with a modern encoding.
        Panics if the modern encoding has no classic counterpart: that is a gap in this table, not bad input.
    */
    pub fn most_compatible_with(modern: TextEncoding) -> LegacyEncoding {
        match modern.name() {
            "UTF-8" | "UTF-16BE" | "UTF-16LE" => MacRoman,
            "macintosh" | "windows-1252" | "ISO-8859-3" | "ISO-8859-15" => MacRoman,
            "ISO-8859-2" | "ISO-8859-4" | "ISO-8859-13" | "windows-1250" | "windows-1257" => MacCentralEurRoman,
            "ISO-8859-5" | "IBM866" | "KOI8-R" | "windows-1251" | "x-mac-cyrillic" => MacCyrillic,
            "KOI8-U" => MacUkrainian,
            "ISO-8859-6" | "windows-1256" => MacArabic,
            "ISO-8859-7" | "windows-1253" => MacGreek,
            "ISO-8859-8" | "ISO-8859-8-I" | "windows-1255" => MacHebrew,
            "ISO-8859-10" => MacIcelandic,
            "ISO-8859-14" => MacCeltic,
            "ISO-8859-16" => MacRomanian,
            "windows-874" => MacThai,
            "windows-1254" => MacTurkish,
            "windows-1258" => MacVietnamese,
            "EUC-JP" | "ISO-2022-JP" | "Shift_JIS" => MacJapanese,
            "GBK" | "gb18030" => MacChineseSimp,
            "Big5" => MacChineseTrad,
            "EUC-KR" => MacKorean,
            other => panic!("no classic Mac encoding is compatible with {other}"),
        }
    }

    /** The most compatible classic encoding for the current locale.
        Reads `LC_ALL`, then `LC_CTYPE`, then `LANG`.
    */
    pub fn system() -> LegacyEncoding {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"].iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty());
        match locale {
            Some(locale) => LegacyEncoding::for_locale(&locale),
            None => MacRoman,
        }
    }

    /** The most compatible classic encoding for a POSIX locale name such as `ja_JP.SJIS` */
    pub fn for_locale(locale: &str) -> LegacyEncoding {
        let (locale, modifier) = match locale.split_once('@') {
            Some((locale, modifier)) => (locale, Some(modifier)),
            None => (locale, None),
        };
        let (language_region, charset) = match locale.split_once('.') {
            Some((language_region, charset)) => (language_region, Some(charset)),
            None => (locale, None),
        };

        if let Some(charset) = charset {
            if let Some(modern) = TextEncoding::for_charset(charset) {
                if !modern.is_unicode() && modern.is_text() {
                    return LegacyEncoding::most_compatible_with(modern);
                }
            }
        }

        let (language, region) = match language_region.split_once('_') {
            Some((language, region)) => (language, region),
            None => (language_region, ""),
        };
        match language.to_ascii_lowercase().as_str() {
            "ja" => MacJapanese,
            "ko" => MacKorean,
            "zh" => match region.to_ascii_uppercase().as_str() {
                "TW" | "HK" | "MO" => MacChineseTrad,
                _ => MacChineseSimp,
            },
            // Serbian Latin uses the Croatian alphabet
            "sr" if modifier == Some("latin") => MacCroatian,
            "ru" | "be" | "bg" | "sr" | "mk" => MacCyrillic,
            "uk" => MacUkrainian,
            "el" => MacGreek,
            "tr" => MacTurkish,
            "he" | "iw" => MacHebrew,
            "ar" => MacArabic,
            "fa" => MacFarsi,
            "th" => MacThai,
            "is" => MacIcelandic,
            "hr" | "sl" => MacCroatian,
            "ro" => MacRomanian,
            "cs" | "pl" | "hu" | "sk" => MacCentralEurRoman,
            "vi" => MacVietnamese,
            _ => MacRoman,
        }
    }
}

impl fmt::Display for LegacyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/** A modern text encoding, as understood by the conversion engine */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub const UTF_8: TextEncoding = TextEncoding(encoding_rs::UTF_8);

    /** Look up an encoding by its WHATWG label, such as `shift_jis` or `latin2` */
    pub fn for_label(label: &str) -> Option<TextEncoding> {
        Encoding::for_label(label.trim().as_bytes()).map(TextEncoding)
    }

    /** Look up the charset part of a POSIX locale, which is often spelt without hyphens (`eucJP`, `utf8`) */
    pub fn for_charset(charset: &str) -> Option<TextEncoding> {
        TextEncoding::for_label(charset).or_else(|| {
            let lower = charset.to_ascii_lowercase();
            if lower == "utf8" {
                Some(TextEncoding::UTF_8)
            }
            else if let Some(rest) = lower.strip_prefix("euc") {
                TextEncoding::for_label(&format!("euc-{}", rest.trim_start_matches('-')))
            }
            else {
                None
            }
        })
    }

    pub fn encoding(self) -> &'static Encoding {
        self.0
    }

    pub fn is_unicode(self) -> bool {
        self.0 == encoding_rs::UTF_8 || self.0 == encoding_rs::UTF_16BE || self.0 == encoding_rs::UTF_16LE
    }

    /** False for the WHATWG pseudo encodings, which have no classic counterpart */
    pub fn is_text(self) -> bool {
        self.0 != encoding_rs::REPLACEMENT && self.0 != encoding_rs::X_USER_DEFINED
    }

    pub fn name(self) -> &'static str {
        self.0.name()
    }
}

impl From<&'static Encoding> for TextEncoding {
    fn from(encoding: &'static Encoding) -> Self {
        TextEncoding(encoding)
    }
}
