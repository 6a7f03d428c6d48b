//! Named character reference tables.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! The WHATWG list defines 2,231 names. This table carries the 1688
//! names that cover HTML 4, the ASCII punctuation names, Latin Extended,
//! Greek, Cyrillic, arrows, mathematical operators and the multi-code-point
//! sequences. Names are stored without their trailing semicolon; every name
//! here requires one except those in [`LEGACY_ENTITIES`].

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Length of the longest name in [`ENTITY_TABLE`].
pub const MAX_ENTITY_NAME_LENGTH: usize = 31;

/// Length of the longest name in [`LEGACY_ENTITIES`] ("frac12", "middot", ...).
pub const MAX_LEGACY_NAME_LENGTH: usize = 6;

/// (name, replacement) pairs.
const ENTITY_TABLE: &[(&str, &str)] = &[
    // Latin-1 (also usable without a semicolon outside attributes)
    ("AElig", "\u{00C6}"),
    ("AMP", "\u{0026}"),
    ("Aacute", "\u{00C1}"),
    ("Acirc", "\u{00C2}"),
    ("Agrave", "\u{00C0}"),
    ("Aring", "\u{00C5}"),
    ("Atilde", "\u{00C3}"),
    ("Auml", "\u{00C4}"),
    ("COPY", "\u{00A9}"),
    ("Ccedil", "\u{00C7}"),
    ("ETH", "\u{00D0}"),
    ("Eacute", "\u{00C9}"),
    ("Ecirc", "\u{00CA}"),
    ("Egrave", "\u{00C8}"),
    ("Euml", "\u{00CB}"),
    ("GT", "\u{003E}"),
    ("Iacute", "\u{00CD}"),
    ("Icirc", "\u{00CE}"),
    ("Igrave", "\u{00CC}"),
    ("Iuml", "\u{00CF}"),
    ("LT", "\u{003C}"),
    ("Ntilde", "\u{00D1}"),
    ("Oacute", "\u{00D3}"),
    ("Ocirc", "\u{00D4}"),
    ("Ograve", "\u{00D2}"),
    ("Oslash", "\u{00D8}"),
    ("Otilde", "\u{00D5}"),
    ("Ouml", "\u{00D6}"),
    ("QUOT", "\u{0022}"),
    ("REG", "\u{00AE}"),
    ("THORN", "\u{00DE}"),
    ("Uacute", "\u{00DA}"),
    ("Ucirc", "\u{00DB}"),
    ("Ugrave", "\u{00D9}"),
    ("Uuml", "\u{00DC}"),
    ("Yacute", "\u{00DD}"),
    ("aacute", "\u{00E1}"),
    ("acirc", "\u{00E2}"),
    ("acute", "\u{00B4}"),
    ("aelig", "\u{00E6}"),
    ("agrave", "\u{00E0}"),
    ("amp", "\u{0026}"),
    ("aring", "\u{00E5}"),
    ("atilde", "\u{00E3}"),
    ("auml", "\u{00E4}"),
    ("brvbar", "\u{00A6}"),
    ("ccedil", "\u{00E7}"),
    ("cedil", "\u{00B8}"),
    ("cent", "\u{00A2}"),
    ("copy", "\u{00A9}"),
    ("curren", "\u{00A4}"),
    ("deg", "\u{00B0}"),
    ("divide", "\u{00F7}"),
    ("eacute", "\u{00E9}"),
    ("ecirc", "\u{00EA}"),
    ("egrave", "\u{00E8}"),
    ("eth", "\u{00F0}"),
    ("euml", "\u{00EB}"),
    ("frac12", "\u{00BD}"),
    ("frac14", "\u{00BC}"),
    ("frac34", "\u{00BE}"),
    ("gt", "\u{003E}"),
    ("iacute", "\u{00ED}"),
    ("icirc", "\u{00EE}"),
    ("iexcl", "\u{00A1}"),
    ("igrave", "\u{00EC}"),
    ("iquest", "\u{00BF}"),
    ("iuml", "\u{00EF}"),
    ("laquo", "\u{00AB}"),
    ("lt", "\u{003C}"),
    ("macr", "\u{00AF}"),
    ("micro", "\u{00B5}"),
    ("middot", "\u{00B7}"),
    ("nbsp", "\u{00A0}"),
    ("not", "\u{00AC}"),
    ("ntilde", "\u{00F1}"),
    ("oacute", "\u{00F3}"),
    ("ocirc", "\u{00F4}"),
    ("ograve", "\u{00F2}"),
    ("ordf", "\u{00AA}"),
    ("ordm", "\u{00BA}"),
    ("oslash", "\u{00F8}"),
    ("otilde", "\u{00F5}"),
    ("ouml", "\u{00F6}"),
    ("para", "\u{00B6}"),
    ("plusmn", "\u{00B1}"),
    ("pound", "\u{00A3}"),
    ("quot", "\u{0022}"),
    ("raquo", "\u{00BB}"),
    ("reg", "\u{00AE}"),
    ("sect", "\u{00A7}"),
    ("shy", "\u{00AD}"),
    ("sup1", "\u{00B9}"),
    ("sup2", "\u{00B2}"),
    ("sup3", "\u{00B3}"),
    ("szlig", "\u{00DF}"),
    ("thorn", "\u{00FE}"),
    ("times", "\u{00D7}"),
    ("uacute", "\u{00FA}"),
    ("ucirc", "\u{00FB}"),
    ("ugrave", "\u{00F9}"),
    ("uml", "\u{00A8}"),
    ("uuml", "\u{00FC}"),
    ("yacute", "\u{00FD}"),
    ("yen", "\u{00A5}"),
    ("yuml", "\u{00FF}"),
    // ASCII punctuation and whitespace
    ("Tab", "\u{0009}"),
    ("NewLine", "\u{000A}"),
    ("excl", "\u{0021}"),
    ("num", "\u{0023}"),
    ("dollar", "\u{0024}"),
    ("percnt", "\u{0025}"),
    ("lpar", "\u{0028}"),
    ("rpar", "\u{0029}"),
    ("ast", "\u{002A}"),
    ("midast", "\u{002A}"),
    ("plus", "\u{002B}"),
    ("comma", "\u{002C}"),
    ("period", "\u{002E}"),
    ("sol", "\u{002F}"),
    ("colon", "\u{003A}"),
    ("semi", "\u{003B}"),
    ("equals", "\u{003D}"),
    ("quest", "\u{003F}"),
    ("commat", "\u{0040}"),
    ("lsqb", "\u{005B}"),
    ("lbrack", "\u{005B}"),
    ("bsol", "\u{005C}"),
    ("rsqb", "\u{005D}"),
    ("rbrack", "\u{005D}"),
    ("Hat", "\u{005E}"),
    ("lowbar", "\u{005F}"),
    ("UnderBar", "\u{005F}"),
    ("grave", "\u{0060}"),
    ("DiacriticalGrave", "\u{0060}"),
    ("lcub", "\u{007B}"),
    ("lbrace", "\u{007B}"),
    ("verbar", "\u{007C}"),
    ("vert", "\u{007C}"),
    ("VerticalLine", "\u{007C}"),
    ("rcub", "\u{007D}"),
    ("rbrace", "\u{007D}"),
    ("apos", "\u{0027}"),
    // Latin-1 aliases
    ("NonBreakingSpace", "\u{00A0}"),
    ("half", "\u{00BD}"),
    ("centerdot", "\u{00B7}"),
    ("CenterDot", "\u{00B7}"),
    ("die", "\u{00A8}"),
    ("Dot", "\u{00A8}"),
    ("DoubleDot", "\u{00A8}"),
    ("circledR", "\u{00AE}"),
    ("strns", "\u{00AF}"),
    ("pm", "\u{00B1}"),
    ("PlusMinus", "\u{00B1}"),
    ("div", "\u{00F7}"),
    ("angst", "\u{00C5}"),
    ("Cedilla", "\u{00B8}"),
    ("DiacriticalAcute", "\u{00B4}"),
    // Latin Extended
    ("Amacr", "\u{0100}"),
    ("amacr", "\u{0101}"),
    ("Abreve", "\u{0102}"),
    ("abreve", "\u{0103}"),
    ("Aogon", "\u{0104}"),
    ("aogon", "\u{0105}"),
    ("Cacute", "\u{0106}"),
    ("cacute", "\u{0107}"),
    ("Ccirc", "\u{0108}"),
    ("ccirc", "\u{0109}"),
    ("Cdot", "\u{010A}"),
    ("cdot", "\u{010B}"),
    ("Ccaron", "\u{010C}"),
    ("ccaron", "\u{010D}"),
    ("Dcaron", "\u{010E}"),
    ("dcaron", "\u{010F}"),
    ("Dstrok", "\u{0110}"),
    ("dstrok", "\u{0111}"),
    ("Emacr", "\u{0112}"),
    ("emacr", "\u{0113}"),
    ("Edot", "\u{0116}"),
    ("edot", "\u{0117}"),
    ("Eogon", "\u{0118}"),
    ("eogon", "\u{0119}"),
    ("Ecaron", "\u{011A}"),
    ("ecaron", "\u{011B}"),
    ("Gcirc", "\u{011C}"),
    ("gcirc", "\u{011D}"),
    ("Gbreve", "\u{011E}"),
    ("gbreve", "\u{011F}"),
    ("Gdot", "\u{0120}"),
    ("gdot", "\u{0121}"),
    ("Gcedil", "\u{0122}"),
    ("Hcirc", "\u{0124}"),
    ("hcirc", "\u{0125}"),
    ("Hstrok", "\u{0126}"),
    ("hstrok", "\u{0127}"),
    ("Itilde", "\u{0128}"),
    ("itilde", "\u{0129}"),
    ("Imacr", "\u{012A}"),
    ("imacr", "\u{012B}"),
    ("Iogon", "\u{012E}"),
    ("iogon", "\u{012F}"),
    ("Idot", "\u{0130}"),
    ("imath", "\u{0131}"),
    ("inodot", "\u{0131}"),
    ("IJlig", "\u{0132}"),
    ("ijlig", "\u{0133}"),
    ("Jcirc", "\u{0134}"),
    ("jcirc", "\u{0135}"),
    ("Kcedil", "\u{0136}"),
    ("kcedil", "\u{0137}"),
    ("kgreen", "\u{0138}"),
    ("Lacute", "\u{0139}"),
    ("lacute", "\u{013A}"),
    ("Lcedil", "\u{013B}"),
    ("lcedil", "\u{013C}"),
    ("Lcaron", "\u{013D}"),
    ("lcaron", "\u{013E}"),
    ("Lmidot", "\u{013F}"),
    ("lmidot", "\u{0140}"),
    ("Lstrok", "\u{0141}"),
    ("lstrok", "\u{0142}"),
    ("Nacute", "\u{0143}"),
    ("nacute", "\u{0144}"),
    ("Ncedil", "\u{0145}"),
    ("ncedil", "\u{0146}"),
    ("Ncaron", "\u{0147}"),
    ("ncaron", "\u{0148}"),
    ("napos", "\u{0149}"),
    ("ENG", "\u{014A}"),
    ("eng", "\u{014B}"),
    ("Omacr", "\u{014C}"),
    ("omacr", "\u{014D}"),
    ("Odblac", "\u{0150}"),
    ("odblac", "\u{0151}"),
    ("OElig", "\u{0152}"),
    ("oelig", "\u{0153}"),
    ("Racute", "\u{0154}"),
    ("racute", "\u{0155}"),
    ("Rcedil", "\u{0156}"),
    ("rcedil", "\u{0157}"),
    ("Rcaron", "\u{0158}"),
    ("rcaron", "\u{0159}"),
    ("Sacute", "\u{015A}"),
    ("sacute", "\u{015B}"),
    ("Scirc", "\u{015C}"),
    ("scirc", "\u{015D}"),
    ("Scedil", "\u{015E}"),
    ("scedil", "\u{015F}"),
    ("Scaron", "\u{0160}"),
    ("scaron", "\u{0161}"),
    ("Tcedil", "\u{0162}"),
    ("tcedil", "\u{0163}"),
    ("Tcaron", "\u{0164}"),
    ("tcaron", "\u{0165}"),
    ("Tstrok", "\u{0166}"),
    ("tstrok", "\u{0167}"),
    ("Utilde", "\u{0168}"),
    ("utilde", "\u{0169}"),
    ("Umacr", "\u{016A}"),
    ("umacr", "\u{016B}"),
    ("Ubreve", "\u{016C}"),
    ("ubreve", "\u{016D}"),
    ("Uring", "\u{016E}"),
    ("uring", "\u{016F}"),
    ("Udblac", "\u{0170}"),
    ("udblac", "\u{0171}"),
    ("Uogon", "\u{0172}"),
    ("uogon", "\u{0173}"),
    ("Wcirc", "\u{0174}"),
    ("wcirc", "\u{0175}"),
    ("Ycirc", "\u{0176}"),
    ("ycirc", "\u{0177}"),
    ("Yuml", "\u{0178}"),
    ("Zacute", "\u{0179}"),
    ("zacute", "\u{017A}"),
    ("Zdot", "\u{017B}"),
    ("zdot", "\u{017C}"),
    ("Zcaron", "\u{017D}"),
    ("zcaron", "\u{017E}"),
    ("fnof", "\u{0192}"),
    ("imped", "\u{01B5}"),
    ("gacute", "\u{01F5}"),
    ("jmath", "\u{0237}"),
    // Spacing modifiers
    ("circ", "\u{02C6}"),
    ("caron", "\u{02C7}"),
    ("Hacek", "\u{02C7}"),
    ("breve", "\u{02D8}"),
    ("Breve", "\u{02D8}"),
    ("dot", "\u{02D9}"),
    ("DiacriticalDot", "\u{02D9}"),
    ("ring", "\u{02DA}"),
    ("ogon", "\u{02DB}"),
    ("tilde", "\u{02DC}"),
    ("DiacriticalTilde", "\u{02DC}"),
    ("dblac", "\u{02DD}"),
    ("DiacriticalDoubleAcute", "\u{02DD}"),
    // Greek
    ("Alpha", "\u{0391}"),
    ("Beta", "\u{0392}"),
    ("Gamma", "\u{0393}"),
    ("Delta", "\u{0394}"),
    ("Epsilon", "\u{0395}"),
    ("Zeta", "\u{0396}"),
    ("Eta", "\u{0397}"),
    ("Theta", "\u{0398}"),
    ("Iota", "\u{0399}"),
    ("Kappa", "\u{039A}"),
    ("Lambda", "\u{039B}"),
    ("Mu", "\u{039C}"),
    ("Nu", "\u{039D}"),
    ("Xi", "\u{039E}"),
    ("Omicron", "\u{039F}"),
    ("Pi", "\u{03A0}"),
    ("Rho", "\u{03A1}"),
    ("Sigma", "\u{03A3}"),
    ("Tau", "\u{03A4}"),
    ("Upsilon", "\u{03A5}"),
    ("Phi", "\u{03A6}"),
    ("Chi", "\u{03A7}"),
    ("Psi", "\u{03A8}"),
    ("Omega", "\u{03A9}"),
    ("ohm", "\u{03A9}"),
    ("alpha", "\u{03B1}"),
    ("beta", "\u{03B2}"),
    ("gamma", "\u{03B3}"),
    ("delta", "\u{03B4}"),
    ("epsilon", "\u{03B5}"),
    ("epsi", "\u{03B5}"),
    ("zeta", "\u{03B6}"),
    ("eta", "\u{03B7}"),
    ("theta", "\u{03B8}"),
    ("iota", "\u{03B9}"),
    ("kappa", "\u{03BA}"),
    ("lambda", "\u{03BB}"),
    ("mu", "\u{03BC}"),
    ("nu", "\u{03BD}"),
    ("xi", "\u{03BE}"),
    ("omicron", "\u{03BF}"),
    ("pi", "\u{03C0}"),
    ("rho", "\u{03C1}"),
    ("sigmaf", "\u{03C2}"),
    ("sigmav", "\u{03C2}"),
    ("varsigma", "\u{03C2}"),
    ("sigma", "\u{03C3}"),
    ("tau", "\u{03C4}"),
    ("upsilon", "\u{03C5}"),
    ("upsi", "\u{03C5}"),
    ("phi", "\u{03C6}"),
    ("chi", "\u{03C7}"),
    ("psi", "\u{03C8}"),
    ("omega", "\u{03C9}"),
    ("thetasym", "\u{03D1}"),
    ("thetav", "\u{03D1}"),
    ("vartheta", "\u{03D1}"),
    ("upsih", "\u{03D2}"),
    ("Upsi", "\u{03D2}"),
    ("phiv", "\u{03D5}"),
    ("varphi", "\u{03D5}"),
    ("straightphi", "\u{03D5}"),
    ("piv", "\u{03D6}"),
    ("varpi", "\u{03D6}"),
    ("Gammad", "\u{03DC}"),
    ("gammad", "\u{03DD}"),
    ("digamma", "\u{03DD}"),
    ("kappav", "\u{03F0}"),
    ("varkappa", "\u{03F0}"),
    ("rhov", "\u{03F1}"),
    ("varrho", "\u{03F1}"),
    ("epsiv", "\u{03F5}"),
    ("varepsilon", "\u{03F5}"),
    ("straightepsilon", "\u{03F5}"),
    ("bepsi", "\u{03F6}"),
    ("backepsilon", "\u{03F6}"),
    // Cyrillic
    ("IOcy", "\u{0401}"),
    ("DJcy", "\u{0402}"),
    ("GJcy", "\u{0403}"),
    ("Jukcy", "\u{0404}"),
    ("DScy", "\u{0405}"),
    ("Iukcy", "\u{0406}"),
    ("YIcy", "\u{0407}"),
    ("Jsercy", "\u{0408}"),
    ("LJcy", "\u{0409}"),
    ("NJcy", "\u{040A}"),
    ("TSHcy", "\u{040B}"),
    ("KJcy", "\u{040C}"),
    ("Ubrcy", "\u{040E}"),
    ("DZcy", "\u{040F}"),
    ("Acy", "\u{0410}"),
    ("Bcy", "\u{0411}"),
    ("Vcy", "\u{0412}"),
    ("Gcy", "\u{0413}"),
    ("Dcy", "\u{0414}"),
    ("IEcy", "\u{0415}"),
    ("ZHcy", "\u{0416}"),
    ("Zcy", "\u{0417}"),
    ("Icy", "\u{0418}"),
    ("Jcy", "\u{0419}"),
    ("Kcy", "\u{041A}"),
    ("Lcy", "\u{041B}"),
    ("Mcy", "\u{041C}"),
    ("Ncy", "\u{041D}"),
    ("Ocy", "\u{041E}"),
    ("Pcy", "\u{041F}"),
    ("Rcy", "\u{0420}"),
    ("Scy", "\u{0421}"),
    ("Tcy", "\u{0422}"),
    ("Ucy", "\u{0423}"),
    ("Fcy", "\u{0424}"),
    ("KHcy", "\u{0425}"),
    ("TScy", "\u{0426}"),
    ("CHcy", "\u{0427}"),
    ("SHcy", "\u{0428}"),
    ("SHCHcy", "\u{0429}"),
    ("HARDcy", "\u{042A}"),
    ("Ycy", "\u{042B}"),
    ("SOFTcy", "\u{042C}"),
    ("Ecy", "\u{042D}"),
    ("YUcy", "\u{042E}"),
    ("YAcy", "\u{042F}"),
    ("acy", "\u{0430}"),
    ("bcy", "\u{0431}"),
    ("vcy", "\u{0432}"),
    ("gcy", "\u{0433}"),
    ("dcy", "\u{0434}"),
    ("iecy", "\u{0435}"),
    ("zhcy", "\u{0436}"),
    ("zcy", "\u{0437}"),
    ("icy", "\u{0438}"),
    ("jcy", "\u{0439}"),
    ("kcy", "\u{043A}"),
    ("lcy", "\u{043B}"),
    ("mcy", "\u{043C}"),
    ("ncy", "\u{043D}"),
    ("ocy", "\u{043E}"),
    ("pcy", "\u{043F}"),
    ("rcy", "\u{0440}"),
    ("scy", "\u{0441}"),
    ("tcy", "\u{0442}"),
    ("ucy", "\u{0443}"),
    ("fcy", "\u{0444}"),
    ("khcy", "\u{0445}"),
    ("tscy", "\u{0446}"),
    ("chcy", "\u{0447}"),
    ("shcy", "\u{0448}"),
    ("shchcy", "\u{0449}"),
    ("hardcy", "\u{044A}"),
    ("ycy", "\u{044B}"),
    ("softcy", "\u{044C}"),
    ("ecy", "\u{044D}"),
    ("yucy", "\u{044E}"),
    ("yacy", "\u{044F}"),
    ("iocy", "\u{0451}"),
    ("djcy", "\u{0452}"),
    ("gjcy", "\u{0453}"),
    ("jukcy", "\u{0454}"),
    ("dscy", "\u{0455}"),
    ("iukcy", "\u{0456}"),
    ("yicy", "\u{0457}"),
    ("jsercy", "\u{0458}"),
    ("ljcy", "\u{0459}"),
    ("njcy", "\u{045A}"),
    ("tshcy", "\u{045B}"),
    ("kjcy", "\u{045C}"),
    ("ubrcy", "\u{045E}"),
    ("dzcy", "\u{045F}"),
    // General punctuation
    ("ensp", "\u{2002}"),
    ("emsp", "\u{2003}"),
    ("emsp13", "\u{2004}"),
    ("emsp14", "\u{2005}"),
    ("numsp", "\u{2007}"),
    ("puncsp", "\u{2008}"),
    ("thinsp", "\u{2009}"),
    ("ThinSpace", "\u{2009}"),
    ("hairsp", "\u{200A}"),
    ("VeryThinSpace", "\u{200A}"),
    ("ZeroWidthSpace", "\u{200B}"),
    ("NegativeVeryThinSpace", "\u{200B}"),
    ("zwnj", "\u{200C}"),
    ("zwj", "\u{200D}"),
    ("lrm", "\u{200E}"),
    ("rlm", "\u{200F}"),
    ("hyphen", "\u{2010}"),
    ("dash", "\u{2010}"),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("horbar", "\u{2015}"),
    ("Verbar", "\u{2016}"),
    ("Vert", "\u{2016}"),
    ("lsquo", "\u{2018}"),
    ("OpenCurlyQuote", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("rsquor", "\u{2019}"),
    ("CloseCurlyQuote", "\u{2019}"),
    ("sbquo", "\u{201A}"),
    ("lsquor", "\u{201A}"),
    ("ldquo", "\u{201C}"),
    ("OpenCurlyDoubleQuote", "\u{201C}"),
    ("rdquo", "\u{201D}"),
    ("rdquor", "\u{201D}"),
    ("CloseCurlyDoubleQuote", "\u{201D}"),
    ("bdquo", "\u{201E}"),
    ("ldquor", "\u{201E}"),
    ("dagger", "\u{2020}"),
    ("Dagger", "\u{2021}"),
    ("ddagger", "\u{2021}"),
    ("bull", "\u{2022}"),
    ("bullet", "\u{2022}"),
    ("nldr", "\u{2025}"),
    ("hellip", "\u{2026}"),
    ("mldr", "\u{2026}"),
    ("permil", "\u{2030}"),
    ("pertenk", "\u{2031}"),
    ("prime", "\u{2032}"),
    ("Prime", "\u{2033}"),
    ("tprime", "\u{2034}"),
    ("bprime", "\u{2035}"),
    ("backprime", "\u{2035}"),
    ("lsaquo", "\u{2039}"),
    ("rsaquo", "\u{203A}"),
    ("oline", "\u{203E}"),
    ("OverBar", "\u{203E}"),
    ("caret", "\u{2041}"),
    ("hybull", "\u{2043}"),
    ("frasl", "\u{2044}"),
    ("bsemi", "\u{204F}"),
    ("qprime", "\u{2057}"),
    ("MediumSpace", "\u{205F}"),
    ("NoBreak", "\u{2060}"),
    ("af", "\u{2061}"),
    ("ApplyFunction", "\u{2061}"),
    ("it", "\u{2062}"),
    ("InvisibleTimes", "\u{2062}"),
    ("ic", "\u{2063}"),
    ("InvisibleComma", "\u{2063}"),
    ("euro", "\u{20AC}"),
    ("tdot", "\u{20DB}"),
    ("TripleDot", "\u{20DB}"),
    ("DotDot", "\u{20DC}"),
    // Letterlike symbols and number forms
    ("Copf", "\u{2102}"),
    ("complexes", "\u{2102}"),
    ("incare", "\u{2105}"),
    ("gscr", "\u{210A}"),
    ("hamilt", "\u{210B}"),
    ("HilbertSpace", "\u{210B}"),
    ("Hscr", "\u{210B}"),
    ("Hfr", "\u{210C}"),
    ("Poincareplane", "\u{210C}"),
    ("quaternions", "\u{210D}"),
    ("Hopf", "\u{210D}"),
    ("planckh", "\u{210E}"),
    ("planck", "\u{210F}"),
    ("hbar", "\u{210F}"),
    ("plankv", "\u{210F}"),
    ("hslash", "\u{210F}"),
    ("Iscr", "\u{2110}"),
    ("imagline", "\u{2110}"),
    ("image", "\u{2111}"),
    ("Im", "\u{2111}"),
    ("imagpart", "\u{2111}"),
    ("Ifr", "\u{2111}"),
    ("Lscr", "\u{2112}"),
    ("lagran", "\u{2112}"),
    ("Laplacetrf", "\u{2112}"),
    ("ell", "\u{2113}"),
    ("Nopf", "\u{2115}"),
    ("naturals", "\u{2115}"),
    ("numero", "\u{2116}"),
    ("copysr", "\u{2117}"),
    ("weierp", "\u{2118}"),
    ("wp", "\u{2118}"),
    ("Popf", "\u{2119}"),
    ("primes", "\u{2119}"),
    ("rationals", "\u{211A}"),
    ("Qopf", "\u{211A}"),
    ("Rscr", "\u{211B}"),
    ("realine", "\u{211B}"),
    ("real", "\u{211C}"),
    ("Re", "\u{211C}"),
    ("realpart", "\u{211C}"),
    ("Rfr", "\u{211C}"),
    ("reals", "\u{211D}"),
    ("Ropf", "\u{211D}"),
    ("rx", "\u{211E}"),
    ("trade", "\u{2122}"),
    ("TRADE", "\u{2122}"),
    ("integers", "\u{2124}"),
    ("Zopf", "\u{2124}"),
    ("mho", "\u{2127}"),
    ("Zfr", "\u{2128}"),
    ("zeetrf", "\u{2128}"),
    ("iiota", "\u{2129}"),
    ("bernou", "\u{212C}"),
    ("Bernoullis", "\u{212C}"),
    ("Bscr", "\u{212C}"),
    ("Cfr", "\u{212D}"),
    ("Cayleys", "\u{212D}"),
    ("escr", "\u{212F}"),
    ("Escr", "\u{2130}"),
    ("expectation", "\u{2130}"),
    ("Fscr", "\u{2131}"),
    ("Fouriertrf", "\u{2131}"),
    ("phmmat", "\u{2133}"),
    ("Mellintrf", "\u{2133}"),
    ("Mscr", "\u{2133}"),
    ("order", "\u{2134}"),
    ("orderof", "\u{2134}"),
    ("oscr", "\u{2134}"),
    ("alefsym", "\u{2135}"),
    ("aleph", "\u{2135}"),
    ("beth", "\u{2136}"),
    ("gimel", "\u{2137}"),
    ("daleth", "\u{2138}"),
    ("DD", "\u{2145}"),
    ("dd", "\u{2146}"),
    ("DifferentialD", "\u{2146}"),
    ("ee", "\u{2147}"),
    ("exponentiale", "\u{2147}"),
    ("ExponentialE", "\u{2147}"),
    ("ii", "\u{2148}"),
    ("ImaginaryI", "\u{2148}"),
    ("frac13", "\u{2153}"),
    ("frac23", "\u{2154}"),
    ("frac15", "\u{2155}"),
    ("frac25", "\u{2156}"),
    ("frac35", "\u{2157}"),
    ("frac45", "\u{2158}"),
    ("frac16", "\u{2159}"),
    ("frac56", "\u{215A}"),
    ("frac18", "\u{215B}"),
    ("frac38", "\u{215C}"),
    ("frac58", "\u{215D}"),
    ("frac78", "\u{215E}"),
    // Arrows
    ("larr", "\u{2190}"),
    ("leftarrow", "\u{2190}"),
    ("LeftArrow", "\u{2190}"),
    ("slarr", "\u{2190}"),
    ("ShortLeftArrow", "\u{2190}"),
    ("uarr", "\u{2191}"),
    ("uparrow", "\u{2191}"),
    ("UpArrow", "\u{2191}"),
    ("ShortUpArrow", "\u{2191}"),
    ("rarr", "\u{2192}"),
    ("rightarrow", "\u{2192}"),
    ("RightArrow", "\u{2192}"),
    ("srarr", "\u{2192}"),
    ("ShortRightArrow", "\u{2192}"),
    ("darr", "\u{2193}"),
    ("downarrow", "\u{2193}"),
    ("DownArrow", "\u{2193}"),
    ("ShortDownArrow", "\u{2193}"),
    ("harr", "\u{2194}"),
    ("leftrightarrow", "\u{2194}"),
    ("LeftRightArrow", "\u{2194}"),
    ("varr", "\u{2195}"),
    ("updownarrow", "\u{2195}"),
    ("UpDownArrow", "\u{2195}"),
    ("nwarr", "\u{2196}"),
    ("UpperLeftArrow", "\u{2196}"),
    ("nwarrow", "\u{2196}"),
    ("nearr", "\u{2197}"),
    ("UpperRightArrow", "\u{2197}"),
    ("nearrow", "\u{2197}"),
    ("searr", "\u{2198}"),
    ("searrow", "\u{2198}"),
    ("LowerRightArrow", "\u{2198}"),
    ("swarr", "\u{2199}"),
    ("swarrow", "\u{2199}"),
    ("LowerLeftArrow", "\u{2199}"),
    ("nlarr", "\u{219A}"),
    ("nleftarrow", "\u{219A}"),
    ("nrarr", "\u{219B}"),
    ("nrightarrow", "\u{219B}"),
    ("rarrw", "\u{219D}"),
    ("rightsquigarrow", "\u{219D}"),
    ("Larr", "\u{219E}"),
    ("twoheadleftarrow", "\u{219E}"),
    ("Uarr", "\u{219F}"),
    ("Rarr", "\u{21A0}"),
    ("twoheadrightarrow", "\u{21A0}"),
    ("Darr", "\u{21A1}"),
    ("larrtl", "\u{21A2}"),
    ("leftarrowtail", "\u{21A2}"),
    ("rarrtl", "\u{21A3}"),
    ("rightarrowtail", "\u{21A3}"),
    ("LeftTeeArrow", "\u{21A4}"),
    ("mapstoleft", "\u{21A4}"),
    ("UpTeeArrow", "\u{21A5}"),
    ("mapstoup", "\u{21A5}"),
    ("map", "\u{21A6}"),
    ("RightTeeArrow", "\u{21A6}"),
    ("mapsto", "\u{21A6}"),
    ("DownTeeArrow", "\u{21A7}"),
    ("mapstodown", "\u{21A7}"),
    ("larrhk", "\u{21A9}"),
    ("hookleftarrow", "\u{21A9}"),
    ("rarrhk", "\u{21AA}"),
    ("hookrightarrow", "\u{21AA}"),
    ("larrlp", "\u{21AB}"),
    ("looparrowleft", "\u{21AB}"),
    ("rarrlp", "\u{21AC}"),
    ("looparrowright", "\u{21AC}"),
    ("harrw", "\u{21AD}"),
    ("leftrightsquigarrow", "\u{21AD}"),
    ("nharr", "\u{21AE}"),
    ("nleftrightarrow", "\u{21AE}"),
    ("lsh", "\u{21B0}"),
    ("Lsh", "\u{21B0}"),
    ("rsh", "\u{21B1}"),
    ("Rsh", "\u{21B1}"),
    ("ldsh", "\u{21B2}"),
    ("rdsh", "\u{21B3}"),
    ("crarr", "\u{21B5}"),
    ("cularr", "\u{21B6}"),
    ("curvearrowleft", "\u{21B6}"),
    ("curarr", "\u{21B7}"),
    ("curvearrowright", "\u{21B7}"),
    ("olarr", "\u{21BA}"),
    ("circlearrowleft", "\u{21BA}"),
    ("orarr", "\u{21BB}"),
    ("circlearrowright", "\u{21BB}"),
    ("lharu", "\u{21BC}"),
    ("leftharpoonup", "\u{21BC}"),
    ("LeftVector", "\u{21BC}"),
    ("lhard", "\u{21BD}"),
    ("leftharpoondown", "\u{21BD}"),
    ("DownLeftVector", "\u{21BD}"),
    ("rharu", "\u{21C0}"),
    ("rightharpoonup", "\u{21C0}"),
    ("RightVector", "\u{21C0}"),
    ("rhard", "\u{21C1}"),
    ("rightharpoondown", "\u{21C1}"),
    ("DownRightVector", "\u{21C1}"),
    ("rlarr", "\u{21C4}"),
    ("rightleftarrows", "\u{21C4}"),
    ("RightArrowLeftArrow", "\u{21C4}"),
    ("udarr", "\u{21C5}"),
    ("UpArrowDownArrow", "\u{21C5}"),
    ("lrarr", "\u{21C6}"),
    ("leftrightarrows", "\u{21C6}"),
    ("LeftArrowRightArrow", "\u{21C6}"),
    ("llarr", "\u{21C7}"),
    ("leftleftarrows", "\u{21C7}"),
    ("uuarr", "\u{21C8}"),
    ("upuparrows", "\u{21C8}"),
    ("rrarr", "\u{21C9}"),
    ("rightrightarrows", "\u{21C9}"),
    ("ddarr", "\u{21CA}"),
    ("downdownarrows", "\u{21CA}"),
    ("lrhar", "\u{21CB}"),
    ("leftrightharpoons", "\u{21CB}"),
    ("ReverseEquilibrium", "\u{21CB}"),
    ("rlhar", "\u{21CC}"),
    ("rightleftharpoons", "\u{21CC}"),
    ("Equilibrium", "\u{21CC}"),
    ("nlArr", "\u{21CD}"),
    ("nLeftarrow", "\u{21CD}"),
    ("nhArr", "\u{21CE}"),
    ("nLeftrightarrow", "\u{21CE}"),
    ("nrArr", "\u{21CF}"),
    ("nRightarrow", "\u{21CF}"),
    ("lArr", "\u{21D0}"),
    ("Leftarrow", "\u{21D0}"),
    ("DoubleLeftArrow", "\u{21D0}"),
    ("uArr", "\u{21D1}"),
    ("Uparrow", "\u{21D1}"),
    ("DoubleUpArrow", "\u{21D1}"),
    ("rArr", "\u{21D2}"),
    ("Rightarrow", "\u{21D2}"),
    ("Implies", "\u{21D2}"),
    ("DoubleRightArrow", "\u{21D2}"),
    ("dArr", "\u{21D3}"),
    ("Downarrow", "\u{21D3}"),
    ("DoubleDownArrow", "\u{21D3}"),
    ("hArr", "\u{21D4}"),
    ("Leftrightarrow", "\u{21D4}"),
    ("iff", "\u{21D4}"),
    ("DoubleLeftRightArrow", "\u{21D4}"),
    ("vArr", "\u{21D5}"),
    ("Updownarrow", "\u{21D5}"),
    ("DoubleUpDownArrow", "\u{21D5}"),
    ("nwArr", "\u{21D6}"),
    ("neArr", "\u{21D7}"),
    ("seArr", "\u{21D8}"),
    ("swArr", "\u{21D9}"),
    ("lAarr", "\u{21DA}"),
    ("Lleftarrow", "\u{21DA}"),
    ("rAarr", "\u{21DB}"),
    ("Rrightarrow", "\u{21DB}"),
    ("zigrarr", "\u{21DD}"),
    ("larrb", "\u{21E4}"),
    ("LeftArrowBar", "\u{21E4}"),
    ("rarrb", "\u{21E5}"),
    ("RightArrowBar", "\u{21E5}"),
    ("duarr", "\u{21F5}"),
    ("DownArrowUpArrow", "\u{21F5}"),
    ("loarr", "\u{21FD}"),
    ("roarr", "\u{21FE}"),
    ("hoarr", "\u{21FF}"),
    ("xlarr", "\u{27F5}"),
    ("longleftarrow", "\u{27F5}"),
    ("LongLeftArrow", "\u{27F5}"),
    ("xrarr", "\u{27F6}"),
    ("longrightarrow", "\u{27F6}"),
    ("LongRightArrow", "\u{27F6}"),
    ("xharr", "\u{27F7}"),
    ("longleftrightarrow", "\u{27F7}"),
    ("LongLeftRightArrow", "\u{27F7}"),
    ("xlArr", "\u{27F8}"),
    ("Longleftarrow", "\u{27F8}"),
    ("DoubleLongLeftArrow", "\u{27F8}"),
    ("xrArr", "\u{27F9}"),
    ("Longrightarrow", "\u{27F9}"),
    ("DoubleLongRightArrow", "\u{27F9}"),
    ("xhArr", "\u{27FA}"),
    ("Longleftrightarrow", "\u{27FA}"),
    ("DoubleLongLeftRightArrow", "\u{27FA}"),
    ("xmap", "\u{27FC}"),
    ("longmapsto", "\u{27FC}"),
    ("dzigrarr", "\u{27FF}"),
    // Mathematical operators
    ("forall", "\u{2200}"),
    ("ForAll", "\u{2200}"),
    ("comp", "\u{2201}"),
    ("complement", "\u{2201}"),
    ("part", "\u{2202}"),
    ("PartialD", "\u{2202}"),
    ("exist", "\u{2203}"),
    ("Exists", "\u{2203}"),
    ("nexist", "\u{2204}"),
    ("NotExists", "\u{2204}"),
    ("nexists", "\u{2204}"),
    ("empty", "\u{2205}"),
    ("emptyset", "\u{2205}"),
    ("emptyv", "\u{2205}"),
    ("varnothing", "\u{2205}"),
    ("nabla", "\u{2207}"),
    ("Del", "\u{2207}"),
    ("isin", "\u{2208}"),
    ("isinv", "\u{2208}"),
    ("Element", "\u{2208}"),
    ("in", "\u{2208}"),
    ("notin", "\u{2209}"),
    ("NotElement", "\u{2209}"),
    ("notinva", "\u{2209}"),
    ("ni", "\u{220B}"),
    ("niv", "\u{220B}"),
    ("ReverseElement", "\u{220B}"),
    ("SuchThat", "\u{220B}"),
    ("notni", "\u{220C}"),
    ("notniva", "\u{220C}"),
    ("NotReverseElement", "\u{220C}"),
    ("prod", "\u{220F}"),
    ("Product", "\u{220F}"),
    ("coprod", "\u{2210}"),
    ("Coproduct", "\u{2210}"),
    ("sum", "\u{2211}"),
    ("Sum", "\u{2211}"),
    ("minus", "\u{2212}"),
    ("mnplus", "\u{2213}"),
    ("mp", "\u{2213}"),
    ("MinusPlus", "\u{2213}"),
    ("plusdo", "\u{2214}"),
    ("dotplus", "\u{2214}"),
    ("setmn", "\u{2216}"),
    ("setminus", "\u{2216}"),
    ("Backslash", "\u{2216}"),
    ("ssetmn", "\u{2216}"),
    ("smallsetminus", "\u{2216}"),
    ("lowast", "\u{2217}"),
    ("compfn", "\u{2218}"),
    ("SmallCircle", "\u{2218}"),
    ("radic", "\u{221A}"),
    ("Sqrt", "\u{221A}"),
    ("prop", "\u{221D}"),
    ("propto", "\u{221D}"),
    ("Proportional", "\u{221D}"),
    ("vprop", "\u{221D}"),
    ("varpropto", "\u{221D}"),
    ("infin", "\u{221E}"),
    ("angrt", "\u{221F}"),
    ("ang", "\u{2220}"),
    ("angle", "\u{2220}"),
    ("angmsd", "\u{2221}"),
    ("measuredangle", "\u{2221}"),
    ("angsph", "\u{2222}"),
    ("mid", "\u{2223}"),
    ("VerticalBar", "\u{2223}"),
    ("smid", "\u{2223}"),
    ("shortmid", "\u{2223}"),
    ("nmid", "\u{2224}"),
    ("NotVerticalBar", "\u{2224}"),
    ("nsmid", "\u{2224}"),
    ("nshortmid", "\u{2224}"),
    ("par", "\u{2225}"),
    ("parallel", "\u{2225}"),
    ("DoubleVerticalBar", "\u{2225}"),
    ("spar", "\u{2225}"),
    ("shortparallel", "\u{2225}"),
    ("npar", "\u{2226}"),
    ("nparallel", "\u{2226}"),
    ("NotDoubleVerticalBar", "\u{2226}"),
    ("nspar", "\u{2226}"),
    ("nshortparallel", "\u{2226}"),
    ("and", "\u{2227}"),
    ("wedge", "\u{2227}"),
    ("or", "\u{2228}"),
    ("vee", "\u{2228}"),
    ("cap", "\u{2229}"),
    ("cup", "\u{222A}"),
    ("int", "\u{222B}"),
    ("Integral", "\u{222B}"),
    ("Int", "\u{222C}"),
    ("tint", "\u{222D}"),
    ("iiint", "\u{222D}"),
    ("conint", "\u{222E}"),
    ("oint", "\u{222E}"),
    ("ContourIntegral", "\u{222E}"),
    ("Conint", "\u{222F}"),
    ("DoubleContourIntegral", "\u{222F}"),
    ("Cconint", "\u{2230}"),
    ("cwint", "\u{2231}"),
    ("cwconint", "\u{2232}"),
    ("ClockwiseContourIntegral", "\u{2232}"),
    ("awconint", "\u{2233}"),
    ("CounterClockwiseContourIntegral", "\u{2233}"),
    ("there4", "\u{2234}"),
    ("therefore", "\u{2234}"),
    ("Therefore", "\u{2234}"),
    ("becaus", "\u{2235}"),
    ("because", "\u{2235}"),
    ("Because", "\u{2235}"),
    ("ratio", "\u{2236}"),
    ("Colon", "\u{2237}"),
    ("Proportion", "\u{2237}"),
    ("minusd", "\u{2238}"),
    ("dotminus", "\u{2238}"),
    ("mDDot", "\u{223A}"),
    ("homtht", "\u{223B}"),
    ("sim", "\u{223C}"),
    ("Tilde", "\u{223C}"),
    ("thksim", "\u{223C}"),
    ("thicksim", "\u{223C}"),
    ("bsim", "\u{223D}"),
    ("backsim", "\u{223D}"),
    ("ac", "\u{223E}"),
    ("mstpos", "\u{223E}"),
    ("acd", "\u{223F}"),
    ("wreath", "\u{2240}"),
    ("wr", "\u{2240}"),
    ("VerticalTilde", "\u{2240}"),
    ("nsim", "\u{2241}"),
    ("NotTilde", "\u{2241}"),
    ("esim", "\u{2242}"),
    ("eqsim", "\u{2242}"),
    ("EqualTilde", "\u{2242}"),
    ("sime", "\u{2243}"),
    ("simeq", "\u{2243}"),
    ("TildeEqual", "\u{2243}"),
    ("nsime", "\u{2244}"),
    ("nsimeq", "\u{2244}"),
    ("NotTildeEqual", "\u{2244}"),
    ("cong", "\u{2245}"),
    ("TildeFullEqual", "\u{2245}"),
    ("simne", "\u{2246}"),
    ("ncong", "\u{2247}"),
    ("NotTildeFullEqual", "\u{2247}"),
    ("asymp", "\u{2248}"),
    ("ap", "\u{2248}"),
    ("approx", "\u{2248}"),
    ("thkap", "\u{2248}"),
    ("thickapprox", "\u{2248}"),
    ("TildeTilde", "\u{2248}"),
    ("nap", "\u{2249}"),
    ("napprox", "\u{2249}"),
    ("NotTildeTilde", "\u{2249}"),
    ("ape", "\u{224A}"),
    ("approxeq", "\u{224A}"),
    ("apid", "\u{224B}"),
    ("bcong", "\u{224C}"),
    ("backcong", "\u{224C}"),
    ("asympeq", "\u{224D}"),
    ("CupCap", "\u{224D}"),
    ("bump", "\u{224E}"),
    ("HumpDownHump", "\u{224E}"),
    ("Bumpeq", "\u{224E}"),
    ("bumpe", "\u{224F}"),
    ("bumpeq", "\u{224F}"),
    ("HumpEqual", "\u{224F}"),
    ("esdot", "\u{2250}"),
    ("doteq", "\u{2250}"),
    ("DotEqual", "\u{2250}"),
    ("eDot", "\u{2251}"),
    ("doteqdot", "\u{2251}"),
    ("efDot", "\u{2252}"),
    ("fallingdotseq", "\u{2252}"),
    ("erDot", "\u{2253}"),
    ("risingdotseq", "\u{2253}"),
    ("colone", "\u{2254}"),
    ("coloneq", "\u{2254}"),
    ("Assign", "\u{2254}"),
    ("ecolon", "\u{2255}"),
    ("eqcolon", "\u{2255}"),
    ("ecir", "\u{2256}"),
    ("eqcirc", "\u{2256}"),
    ("cire", "\u{2257}"),
    ("circeq", "\u{2257}"),
    ("wedgeq", "\u{2259}"),
    ("veeeq", "\u{225A}"),
    ("trie", "\u{225C}"),
    ("triangleq", "\u{225C}"),
    ("equest", "\u{225F}"),
    ("questeq", "\u{225F}"),
    ("ne", "\u{2260}"),
    ("NotEqual", "\u{2260}"),
    ("equiv", "\u{2261}"),
    ("Congruent", "\u{2261}"),
    ("nequiv", "\u{2262}"),
    ("NotCongruent", "\u{2262}"),
    ("le", "\u{2264}"),
    ("leq", "\u{2264}"),
    ("ge", "\u{2265}"),
    ("geq", "\u{2265}"),
    ("GreaterEqual", "\u{2265}"),
    ("lE", "\u{2266}"),
    ("leqq", "\u{2266}"),
    ("LessFullEqual", "\u{2266}"),
    ("gE", "\u{2267}"),
    ("geqq", "\u{2267}"),
    ("GreaterFullEqual", "\u{2267}"),
    ("lnE", "\u{2268}"),
    ("lneqq", "\u{2268}"),
    ("gnE", "\u{2269}"),
    ("gneqq", "\u{2269}"),
    ("Lt", "\u{226A}"),
    ("ll", "\u{226A}"),
    ("NestedLessLess", "\u{226A}"),
    ("Gt", "\u{226B}"),
    ("gg", "\u{226B}"),
    ("NestedGreaterGreater", "\u{226B}"),
    ("twixt", "\u{226C}"),
    ("between", "\u{226C}"),
    ("NotCupCap", "\u{226D}"),
    ("nlt", "\u{226E}"),
    ("NotLess", "\u{226E}"),
    ("nless", "\u{226E}"),
    ("ngt", "\u{226F}"),
    ("NotGreater", "\u{226F}"),
    ("ngtr", "\u{226F}"),
    ("nle", "\u{2270}"),
    ("NotLessEqual", "\u{2270}"),
    ("nleq", "\u{2270}"),
    ("nge", "\u{2271}"),
    ("NotGreaterEqual", "\u{2271}"),
    ("ngeq", "\u{2271}"),
    ("lsim", "\u{2272}"),
    ("lesssim", "\u{2272}"),
    ("LessTilde", "\u{2272}"),
    ("gsim", "\u{2273}"),
    ("gtrsim", "\u{2273}"),
    ("GreaterTilde", "\u{2273}"),
    ("nlsim", "\u{2274}"),
    ("NotLessTilde", "\u{2274}"),
    ("ngsim", "\u{2275}"),
    ("NotGreaterTilde", "\u{2275}"),
    ("lg", "\u{2276}"),
    ("lessgtr", "\u{2276}"),
    ("LessGreater", "\u{2276}"),
    ("gl", "\u{2277}"),
    ("gtrless", "\u{2277}"),
    ("GreaterLess", "\u{2277}"),
    ("ntlg", "\u{2278}"),
    ("NotLessGreater", "\u{2278}"),
    ("ntgl", "\u{2279}"),
    ("NotGreaterLess", "\u{2279}"),
    ("pr", "\u{227A}"),
    ("Precedes", "\u{227A}"),
    ("prec", "\u{227A}"),
    ("sc", "\u{227B}"),
    ("Succeeds", "\u{227B}"),
    ("succ", "\u{227B}"),
    ("prcue", "\u{227C}"),
    ("PrecedesSlantEqual", "\u{227C}"),
    ("preccurlyeq", "\u{227C}"),
    ("sccue", "\u{227D}"),
    ("SucceedsSlantEqual", "\u{227D}"),
    ("succcurlyeq", "\u{227D}"),
    ("prsim", "\u{227E}"),
    ("precsim", "\u{227E}"),
    ("PrecedesTilde", "\u{227E}"),
    ("scsim", "\u{227F}"),
    ("succsim", "\u{227F}"),
    ("SucceedsTilde", "\u{227F}"),
    ("npr", "\u{2280}"),
    ("nprec", "\u{2280}"),
    ("NotPrecedes", "\u{2280}"),
    ("nsc", "\u{2281}"),
    ("nsucc", "\u{2281}"),
    ("NotSucceeds", "\u{2281}"),
    ("sub", "\u{2282}"),
    ("subset", "\u{2282}"),
    ("sup", "\u{2283}"),
    ("supset", "\u{2283}"),
    ("Superset", "\u{2283}"),
    ("nsub", "\u{2284}"),
    ("nsup", "\u{2285}"),
    ("sube", "\u{2286}"),
    ("SubsetEqual", "\u{2286}"),
    ("subseteq", "\u{2286}"),
    ("supe", "\u{2287}"),
    ("supseteq", "\u{2287}"),
    ("SupersetEqual", "\u{2287}"),
    ("nsube", "\u{2288}"),
    ("nsubseteq", "\u{2288}"),
    ("NotSubsetEqual", "\u{2288}"),
    ("nsupe", "\u{2289}"),
    ("nsupseteq", "\u{2289}"),
    ("NotSupersetEqual", "\u{2289}"),
    ("subne", "\u{228A}"),
    ("subsetneq", "\u{228A}"),
    ("supne", "\u{228B}"),
    ("supsetneq", "\u{228B}"),
    ("cupdot", "\u{228D}"),
    ("uplus", "\u{228E}"),
    ("UnionPlus", "\u{228E}"),
    ("sqsub", "\u{228F}"),
    ("SquareSubset", "\u{228F}"),
    ("sqsubset", "\u{228F}"),
    ("sqsup", "\u{2290}"),
    ("SquareSuperset", "\u{2290}"),
    ("sqsupset", "\u{2290}"),
    ("sqsube", "\u{2291}"),
    ("SquareSubsetEqual", "\u{2291}"),
    ("sqsubseteq", "\u{2291}"),
    ("sqsupe", "\u{2292}"),
    ("SquareSupersetEqual", "\u{2292}"),
    ("sqsupseteq", "\u{2292}"),
    ("sqcap", "\u{2293}"),
    ("SquareIntersection", "\u{2293}"),
    ("sqcup", "\u{2294}"),
    ("SquareUnion", "\u{2294}"),
    ("oplus", "\u{2295}"),
    ("CirclePlus", "\u{2295}"),
    ("ominus", "\u{2296}"),
    ("CircleMinus", "\u{2296}"),
    ("otimes", "\u{2297}"),
    ("CircleTimes", "\u{2297}"),
    ("osol", "\u{2298}"),
    ("odot", "\u{2299}"),
    ("CircleDot", "\u{2299}"),
    ("ocir", "\u{229A}"),
    ("circledcirc", "\u{229A}"),
    ("oast", "\u{229B}"),
    ("circledast", "\u{229B}"),
    ("odash", "\u{229D}"),
    ("circleddash", "\u{229D}"),
    ("plusb", "\u{229E}"),
    ("boxplus", "\u{229E}"),
    ("minusb", "\u{229F}"),
    ("boxminus", "\u{229F}"),
    ("timesb", "\u{22A0}"),
    ("boxtimes", "\u{22A0}"),
    ("sdotb", "\u{22A1}"),
    ("dotsquare", "\u{22A1}"),
    ("vdash", "\u{22A2}"),
    ("RightTee", "\u{22A2}"),
    ("dashv", "\u{22A3}"),
    ("LeftTee", "\u{22A3}"),
    ("top", "\u{22A4}"),
    ("DownTee", "\u{22A4}"),
    ("bottom", "\u{22A5}"),
    ("bot", "\u{22A5}"),
    ("perp", "\u{22A5}"),
    ("UpTee", "\u{22A5}"),
    ("models", "\u{22A7}"),
    ("vDash", "\u{22A8}"),
    ("DoubleRightTee", "\u{22A8}"),
    ("Vdash", "\u{22A9}"),
    ("Vvdash", "\u{22AA}"),
    ("VDash", "\u{22AB}"),
    ("nvdash", "\u{22AC}"),
    ("nvDash", "\u{22AD}"),
    ("nVdash", "\u{22AE}"),
    ("nVDash", "\u{22AF}"),
    ("prurel", "\u{22B0}"),
    ("vltri", "\u{22B2}"),
    ("vartriangleleft", "\u{22B2}"),
    ("LeftTriangle", "\u{22B2}"),
    ("vrtri", "\u{22B3}"),
    ("vartriangleright", "\u{22B3}"),
    ("RightTriangle", "\u{22B3}"),
    ("ltrie", "\u{22B4}"),
    ("trianglelefteq", "\u{22B4}"),
    ("LeftTriangleEqual", "\u{22B4}"),
    ("rtrie", "\u{22B5}"),
    ("trianglerighteq", "\u{22B5}"),
    ("RightTriangleEqual", "\u{22B5}"),
    ("origof", "\u{22B6}"),
    ("imof", "\u{22B7}"),
    ("mumap", "\u{22B8}"),
    ("multimap", "\u{22B8}"),
    ("hercon", "\u{22B9}"),
    ("intcal", "\u{22BA}"),
    ("intercal", "\u{22BA}"),
    ("veebar", "\u{22BB}"),
    ("barvee", "\u{22BD}"),
    ("angrtvb", "\u{22BE}"),
    ("lrtri", "\u{22BF}"),
    ("xwedge", "\u{22C0}"),
    ("Wedge", "\u{22C0}"),
    ("bigwedge", "\u{22C0}"),
    ("xvee", "\u{22C1}"),
    ("Vee", "\u{22C1}"),
    ("bigvee", "\u{22C1}"),
    ("xcap", "\u{22C2}"),
    ("Intersection", "\u{22C2}"),
    ("bigcap", "\u{22C2}"),
    ("xcup", "\u{22C3}"),
    ("Union", "\u{22C3}"),
    ("bigcup", "\u{22C3}"),
    ("diam", "\u{22C4}"),
    ("diamond", "\u{22C4}"),
    ("Diamond", "\u{22C4}"),
    ("sdot", "\u{22C5}"),
    ("sstarf", "\u{22C6}"),
    ("Star", "\u{22C6}"),
    ("divonx", "\u{22C7}"),
    ("divideontimes", "\u{22C7}"),
    ("bowtie", "\u{22C8}"),
    ("ltimes", "\u{22C9}"),
    ("rtimes", "\u{22CA}"),
    ("lthree", "\u{22CB}"),
    ("leftthreetimes", "\u{22CB}"),
    ("rthree", "\u{22CC}"),
    ("rightthreetimes", "\u{22CC}"),
    ("bsime", "\u{22CD}"),
    ("backsimeq", "\u{22CD}"),
    ("cuvee", "\u{22CE}"),
    ("curlyvee", "\u{22CE}"),
    ("cuwed", "\u{22CF}"),
    ("curlywedge", "\u{22CF}"),
    ("Sub", "\u{22D0}"),
    ("Subset", "\u{22D0}"),
    ("Sup", "\u{22D1}"),
    ("Supset", "\u{22D1}"),
    ("Cap", "\u{22D2}"),
    ("Cup", "\u{22D3}"),
    ("fork", "\u{22D4}"),
    ("pitchfork", "\u{22D4}"),
    ("epar", "\u{22D5}"),
    ("ltdot", "\u{22D6}"),
    ("lessdot", "\u{22D6}"),
    ("gtdot", "\u{22D7}"),
    ("gtrdot", "\u{22D7}"),
    ("Ll", "\u{22D8}"),
    ("Gg", "\u{22D9}"),
    ("ggg", "\u{22D9}"),
    ("leg", "\u{22DA}"),
    ("LessEqualGreater", "\u{22DA}"),
    ("lesseqgtr", "\u{22DA}"),
    ("gel", "\u{22DB}"),
    ("gtreqless", "\u{22DB}"),
    ("GreaterEqualLess", "\u{22DB}"),
    ("cuepr", "\u{22DE}"),
    ("curlyeqprec", "\u{22DE}"),
    ("cuesc", "\u{22DF}"),
    ("curlyeqsucc", "\u{22DF}"),
    ("nprcue", "\u{22E0}"),
    ("NotPrecedesSlantEqual", "\u{22E0}"),
    ("nsccue", "\u{22E1}"),
    ("NotSucceedsSlantEqual", "\u{22E1}"),
    ("nsqsube", "\u{22E2}"),
    ("NotSquareSubsetEqual", "\u{22E2}"),
    ("nsqsupe", "\u{22E3}"),
    ("NotSquareSupersetEqual", "\u{22E3}"),
    ("lnsim", "\u{22E6}"),
    ("gnsim", "\u{22E7}"),
    ("prnsim", "\u{22E8}"),
    ("precnsim", "\u{22E8}"),
    ("scnsim", "\u{22E9}"),
    ("succnsim", "\u{22E9}"),
    ("nltri", "\u{22EA}"),
    ("ntriangleleft", "\u{22EA}"),
    ("NotLeftTriangle", "\u{22EA}"),
    ("nrtri", "\u{22EB}"),
    ("ntriangleright", "\u{22EB}"),
    ("NotRightTriangle", "\u{22EB}"),
    ("nltrie", "\u{22EC}"),
    ("ntrianglelefteq", "\u{22EC}"),
    ("NotLeftTriangleEqual", "\u{22EC}"),
    ("nrtrie", "\u{22ED}"),
    ("ntrianglerighteq", "\u{22ED}"),
    ("NotRightTriangleEqual", "\u{22ED}"),
    ("vellip", "\u{22EE}"),
    ("ctdot", "\u{22EF}"),
    ("utdot", "\u{22F0}"),
    ("dtdot", "\u{22F1}"),
    ("disin", "\u{22F2}"),
    ("isinsv", "\u{22F3}"),
    ("isins", "\u{22F4}"),
    ("isindot", "\u{22F5}"),
    ("notinvc", "\u{22F6}"),
    ("notinvb", "\u{22F7}"),
    ("isinE", "\u{22F9}"),
    ("nisd", "\u{22FA}"),
    ("xnis", "\u{22FB}"),
    ("nis", "\u{22FC}"),
    ("notnivc", "\u{22FD}"),
    ("notnivb", "\u{22FE}"),
    // Miscellaneous technical
    ("barwed", "\u{2305}"),
    ("barwedge", "\u{2305}"),
    ("Barwed", "\u{2306}"),
    ("doublebarwedge", "\u{2306}"),
    ("lceil", "\u{2308}"),
    ("LeftCeiling", "\u{2308}"),
    ("rceil", "\u{2309}"),
    ("RightCeiling", "\u{2309}"),
    ("lfloor", "\u{230A}"),
    ("LeftFloor", "\u{230A}"),
    ("rfloor", "\u{230B}"),
    ("RightFloor", "\u{230B}"),
    ("drcrop", "\u{230C}"),
    ("dlcrop", "\u{230D}"),
    ("urcrop", "\u{230E}"),
    ("ulcrop", "\u{230F}"),
    ("bnot", "\u{2310}"),
    ("profline", "\u{2312}"),
    ("profsurf", "\u{2313}"),
    ("telrec", "\u{2315}"),
    ("target", "\u{2316}"),
    ("ulcorn", "\u{231C}"),
    ("ulcorner", "\u{231C}"),
    ("urcorn", "\u{231D}"),
    ("urcorner", "\u{231D}"),
    ("dlcorn", "\u{231E}"),
    ("llcorner", "\u{231E}"),
    ("drcorn", "\u{231F}"),
    ("lrcorner", "\u{231F}"),
    ("frown", "\u{2322}"),
    ("sfrown", "\u{2322}"),
    ("smile", "\u{2323}"),
    ("ssmile", "\u{2323}"),
    ("cylcty", "\u{232D}"),
    ("profalar", "\u{232E}"),
    ("topbot", "\u{2336}"),
    ("ovbar", "\u{233D}"),
    ("solbar", "\u{233F}"),
    ("angzarr", "\u{237C}"),
    ("lmoust", "\u{23B0}"),
    ("lmoustache", "\u{23B0}"),
    ("rmoust", "\u{23B1}"),
    ("rmoustache", "\u{23B1}"),
    ("tbrk", "\u{23B4}"),
    ("OverBracket", "\u{23B4}"),
    ("bbrk", "\u{23B5}"),
    ("UnderBracket", "\u{23B5}"),
    ("bbrktbrk", "\u{23B6}"),
    ("OverParenthesis", "\u{23DC}"),
    ("UnderParenthesis", "\u{23DD}"),
    ("OverBrace", "\u{23DE}"),
    ("UnderBrace", "\u{23DF}"),
    ("trpezium", "\u{23E2}"),
    ("elinters", "\u{23E7}"),
    ("blank", "\u{2423}"),
    ("oS", "\u{24C8}"),
    ("circledS", "\u{24C8}"),
    ("lang", "\u{27E8}"),
    ("langle", "\u{27E8}"),
    ("LeftAngleBracket", "\u{27E8}"),
    ("rang", "\u{27E9}"),
    ("rangle", "\u{27E9}"),
    ("RightAngleBracket", "\u{27E9}"),
    ("Lang", "\u{27EA}"),
    ("Rang", "\u{27EB}"),
    ("loang", "\u{27EC}"),
    ("roang", "\u{27ED}"),
    ("lobrk", "\u{27E6}"),
    ("LeftDoubleBracket", "\u{27E6}"),
    ("robrk", "\u{27E7}"),
    ("RightDoubleBracket", "\u{27E7}"),
    // Box drawing, shapes and dingbats
    ("boxh", "\u{2500}"),
    ("HorizontalLine", "\u{2500}"),
    ("boxv", "\u{2502}"),
    ("boxdr", "\u{250C}"),
    ("boxdl", "\u{2510}"),
    ("boxur", "\u{2514}"),
    ("boxul", "\u{2518}"),
    ("boxvr", "\u{251C}"),
    ("boxvl", "\u{2524}"),
    ("boxhd", "\u{252C}"),
    ("boxhu", "\u{2534}"),
    ("boxvh", "\u{253C}"),
    ("boxH", "\u{2550}"),
    ("boxV", "\u{2551}"),
    ("boxdR", "\u{2552}"),
    ("boxDr", "\u{2553}"),
    ("boxDR", "\u{2554}"),
    ("boxdL", "\u{2555}"),
    ("boxDl", "\u{2556}"),
    ("boxDL", "\u{2557}"),
    ("boxuR", "\u{2558}"),
    ("boxUr", "\u{2559}"),
    ("boxUR", "\u{255A}"),
    ("boxuL", "\u{255B}"),
    ("boxUl", "\u{255C}"),
    ("boxUL", "\u{255D}"),
    ("boxvR", "\u{255E}"),
    ("boxVr", "\u{255F}"),
    ("boxVR", "\u{2560}"),
    ("boxvL", "\u{2561}"),
    ("boxVl", "\u{2562}"),
    ("boxVL", "\u{2563}"),
    ("boxHd", "\u{2564}"),
    ("boxhD", "\u{2565}"),
    ("boxHD", "\u{2566}"),
    ("boxHu", "\u{2567}"),
    ("boxhU", "\u{2568}"),
    ("boxHU", "\u{2569}"),
    ("boxvH", "\u{256A}"),
    ("boxVh", "\u{256B}"),
    ("boxVH", "\u{256C}"),
    ("uhblk", "\u{2580}"),
    ("lhblk", "\u{2584}"),
    ("block", "\u{2588}"),
    ("blk14", "\u{2591}"),
    ("blk12", "\u{2592}"),
    ("blk34", "\u{2593}"),
    ("squ", "\u{25A1}"),
    ("square", "\u{25A1}"),
    ("Square", "\u{25A1}"),
    ("squf", "\u{25AA}"),
    ("squarf", "\u{25AA}"),
    ("blacksquare", "\u{25AA}"),
    ("FilledVerySmallSquare", "\u{25AA}"),
    ("EmptyVerySmallSquare", "\u{25AB}"),
    ("rect", "\u{25AD}"),
    ("marker", "\u{25AE}"),
    ("fltns", "\u{25B1}"),
    ("xutri", "\u{25B3}"),
    ("bigtriangleup", "\u{25B3}"),
    ("utrif", "\u{25B4}"),
    ("blacktriangle", "\u{25B4}"),
    ("utri", "\u{25B5}"),
    ("triangle", "\u{25B5}"),
    ("rtrif", "\u{25B8}"),
    ("blacktriangleright", "\u{25B8}"),
    ("rtri", "\u{25B9}"),
    ("triangleright", "\u{25B9}"),
    ("xdtri", "\u{25BD}"),
    ("bigtriangledown", "\u{25BD}"),
    ("dtrif", "\u{25BE}"),
    ("blacktriangledown", "\u{25BE}"),
    ("dtri", "\u{25BF}"),
    ("triangledown", "\u{25BF}"),
    ("ltrif", "\u{25C2}"),
    ("blacktriangleleft", "\u{25C2}"),
    ("ltri", "\u{25C3}"),
    ("triangleleft", "\u{25C3}"),
    ("loz", "\u{25CA}"),
    ("lozenge", "\u{25CA}"),
    ("cir", "\u{25CB}"),
    ("tridot", "\u{25EC}"),
    ("xcirc", "\u{25EF}"),
    ("bigcirc", "\u{25EF}"),
    ("ultri", "\u{25F8}"),
    ("urtri", "\u{25F9}"),
    ("lltri", "\u{25FA}"),
    ("EmptySmallSquare", "\u{25FB}"),
    ("FilledSmallSquare", "\u{25FC}"),
    ("starf", "\u{2605}"),
    ("bigstar", "\u{2605}"),
    ("star", "\u{2606}"),
    ("phone", "\u{260E}"),
    ("female", "\u{2640}"),
    ("male", "\u{2642}"),
    ("spades", "\u{2660}"),
    ("spadesuit", "\u{2660}"),
    ("clubs", "\u{2663}"),
    ("clubsuit", "\u{2663}"),
    ("hearts", "\u{2665}"),
    ("heartsuit", "\u{2665}"),
    ("diams", "\u{2666}"),
    ("diamondsuit", "\u{2666}"),
    ("sung", "\u{266A}"),
    ("flat", "\u{266D}"),
    ("natur", "\u{266E}"),
    ("natural", "\u{266E}"),
    ("sharp", "\u{266F}"),
    ("check", "\u{2713}"),
    ("checkmark", "\u{2713}"),
    ("cross", "\u{2717}"),
    ("malt", "\u{2720}"),
    ("maltese", "\u{2720}"),
    ("sext", "\u{2736}"),
    ("VerticalSeparator", "\u{2758}"),
    ("lbbrk", "\u{2772}"),
    ("rbbrk", "\u{2773}"),
    // Ligatures
    ("fflig", "\u{FB00}"),
    ("filig", "\u{FB01}"),
    ("fllig", "\u{FB02}"),
    ("ffilig", "\u{FB03}"),
    ("ffllig", "\u{FB04}"),
    // Mathematical alphanumerics
    ("Ascr", "\u{1D49C}"),
    ("Cscr", "\u{1D49E}"),
    ("Dscr", "\u{1D49F}"),
    ("Gscr", "\u{1D4A2}"),
    ("Jscr", "\u{1D4A5}"),
    ("Kscr", "\u{1D4A6}"),
    ("Nscr", "\u{1D4A9}"),
    ("Oscr", "\u{1D4AA}"),
    ("Pscr", "\u{1D4AB}"),
    ("Qscr", "\u{1D4AC}"),
    ("Sscr", "\u{1D4AE}"),
    ("Tscr", "\u{1D4AF}"),
    ("Uscr", "\u{1D4B0}"),
    ("Vscr", "\u{1D4B1}"),
    ("Wscr", "\u{1D4B2}"),
    ("Xscr", "\u{1D4B3}"),
    ("Yscr", "\u{1D4B4}"),
    ("Zscr", "\u{1D4B5}"),
    ("ascr", "\u{1D4B6}"),
    ("bscr", "\u{1D4B7}"),
    ("cscr", "\u{1D4B8}"),
    ("dscr", "\u{1D4B9}"),
    ("fscr", "\u{1D4BB}"),
    ("hscr", "\u{1D4BD}"),
    ("iscr", "\u{1D4BE}"),
    ("jscr", "\u{1D4BF}"),
    ("kscr", "\u{1D4C0}"),
    ("lscr", "\u{1D4C1}"),
    ("mscr", "\u{1D4C2}"),
    ("nscr", "\u{1D4C3}"),
    ("pscr", "\u{1D4C5}"),
    ("qscr", "\u{1D4C6}"),
    ("rscr", "\u{1D4C7}"),
    ("sscr", "\u{1D4C8}"),
    ("tscr", "\u{1D4C9}"),
    ("uscr", "\u{1D4CA}"),
    ("vscr", "\u{1D4CB}"),
    ("wscr", "\u{1D4CC}"),
    ("xscr", "\u{1D4CD}"),
    ("yscr", "\u{1D4CE}"),
    ("zscr", "\u{1D4CF}"),
    ("Afr", "\u{1D504}"),
    ("Bfr", "\u{1D505}"),
    ("Dfr", "\u{1D507}"),
    ("Efr", "\u{1D508}"),
    ("Ffr", "\u{1D509}"),
    ("Gfr", "\u{1D50A}"),
    ("Jfr", "\u{1D50D}"),
    ("Kfr", "\u{1D50E}"),
    ("Lfr", "\u{1D50F}"),
    ("Mfr", "\u{1D510}"),
    ("Nfr", "\u{1D511}"),
    ("Ofr", "\u{1D512}"),
    ("Pfr", "\u{1D513}"),
    ("Qfr", "\u{1D514}"),
    ("Sfr", "\u{1D516}"),
    ("Tfr", "\u{1D517}"),
    ("Ufr", "\u{1D518}"),
    ("Vfr", "\u{1D519}"),
    ("Wfr", "\u{1D51A}"),
    ("Xfr", "\u{1D51B}"),
    ("Yfr", "\u{1D51C}"),
    ("afr", "\u{1D51E}"),
    ("bfr", "\u{1D51F}"),
    ("cfr", "\u{1D520}"),
    ("dfr", "\u{1D521}"),
    ("efr", "\u{1D522}"),
    ("ffr", "\u{1D523}"),
    ("gfr", "\u{1D524}"),
    ("hfr", "\u{1D525}"),
    ("ifr", "\u{1D526}"),
    ("jfr", "\u{1D527}"),
    ("kfr", "\u{1D528}"),
    ("lfr", "\u{1D529}"),
    ("mfr", "\u{1D52A}"),
    ("nfr", "\u{1D52B}"),
    ("ofr", "\u{1D52C}"),
    ("pfr", "\u{1D52D}"),
    ("qfr", "\u{1D52E}"),
    ("rfr", "\u{1D52F}"),
    ("sfr", "\u{1D530}"),
    ("tfr", "\u{1D531}"),
    ("ufr", "\u{1D532}"),
    ("vfr", "\u{1D533}"),
    ("wfr", "\u{1D534}"),
    ("xfr", "\u{1D535}"),
    ("yfr", "\u{1D536}"),
    ("zfr", "\u{1D537}"),
    ("Aopf", "\u{1D538}"),
    ("Bopf", "\u{1D539}"),
    ("Dopf", "\u{1D53B}"),
    ("Eopf", "\u{1D53C}"),
    ("Fopf", "\u{1D53D}"),
    ("Gopf", "\u{1D53E}"),
    ("Iopf", "\u{1D540}"),
    ("Jopf", "\u{1D541}"),
    ("Kopf", "\u{1D542}"),
    ("Lopf", "\u{1D543}"),
    ("Mopf", "\u{1D544}"),
    ("Oopf", "\u{1D546}"),
    ("Sopf", "\u{1D54A}"),
    ("Topf", "\u{1D54B}"),
    ("Uopf", "\u{1D54C}"),
    ("Vopf", "\u{1D54D}"),
    ("Wopf", "\u{1D54E}"),
    ("Xopf", "\u{1D54F}"),
    ("Yopf", "\u{1D550}"),
    ("aopf", "\u{1D552}"),
    ("bopf", "\u{1D553}"),
    ("copf", "\u{1D554}"),
    ("dopf", "\u{1D555}"),
    ("eopf", "\u{1D556}"),
    ("fopf", "\u{1D557}"),
    ("gopf", "\u{1D558}"),
    ("hopf", "\u{1D559}"),
    ("iopf", "\u{1D55A}"),
    ("jopf", "\u{1D55B}"),
    ("kopf", "\u{1D55C}"),
    ("lopf", "\u{1D55D}"),
    ("mopf", "\u{1D55E}"),
    ("nopf", "\u{1D55F}"),
    ("oopf", "\u{1D560}"),
    ("popf", "\u{1D561}"),
    ("qopf", "\u{1D562}"),
    ("ropf", "\u{1D563}"),
    ("sopf", "\u{1D564}"),
    ("topf", "\u{1D565}"),
    ("uopf", "\u{1D566}"),
    ("vopf", "\u{1D567}"),
    ("wopf", "\u{1D568}"),
    ("xopf", "\u{1D569}"),
    ("yopf", "\u{1D56A}"),
    ("zopf", "\u{1D56B}"),
    // Multi-code-point sequences
    ("fjlig", "\u{0066}\u{006A}"),
    ("ThickSpace", "\u{205F}\u{200A}"),
    ("nvlt", "\u{003C}\u{20D2}"),
    ("nvgt", "\u{003E}\u{20D2}"),
    ("bne", "\u{003D}\u{20E5}"),
    ("bnequiv", "\u{2261}\u{20E5}"),
    ("nvap", "\u{224D}\u{20D2}"),
    ("nvle", "\u{2264}\u{20D2}"),
    ("nvge", "\u{2265}\u{20D2}"),
    ("nLt", "\u{226A}\u{20D2}"),
    ("nGt", "\u{226B}\u{20D2}"),
    ("nLtv", "\u{226A}\u{0338}"),
    ("NotLessLess", "\u{226A}\u{0338}"),
    ("nGtv", "\u{226B}\u{0338}"),
    ("NotGreaterGreater", "\u{226B}\u{0338}"),
    ("nesim", "\u{2242}\u{0338}"),
    ("NotEqualTilde", "\u{2242}\u{0338}"),
    ("napid", "\u{224B}\u{0338}"),
    ("nbump", "\u{224E}\u{0338}"),
    ("NotHumpDownHump", "\u{224E}\u{0338}"),
    ("nbumpe", "\u{224F}\u{0338}"),
    ("NotHumpEqual", "\u{224F}\u{0338}"),
    ("nedot", "\u{2250}\u{0338}"),
    ("nlE", "\u{2266}\u{0338}"),
    ("nleqq", "\u{2266}\u{0338}"),
    ("ngE", "\u{2267}\u{0338}"),
    ("ngeqq", "\u{2267}\u{0338}"),
    ("NotGreaterFullEqual", "\u{2267}\u{0338}"),
    ("lvnE", "\u{2268}\u{FE00}"),
    ("lvertneqq", "\u{2268}\u{FE00}"),
    ("gvnE", "\u{2269}\u{FE00}"),
    ("gvertneqq", "\u{2269}\u{FE00}"),
    ("vsubne", "\u{228A}\u{FE00}"),
    ("varsubsetneq", "\u{228A}\u{FE00}"),
    ("vsupne", "\u{228B}\u{FE00}"),
    ("varsupsetneq", "\u{228B}\u{FE00}"),
    ("NotSquareSubset", "\u{228F}\u{0338}"),
    ("NotSquareSuperset", "\u{2290}\u{0338}"),
    ("caps", "\u{2229}\u{FE00}"),
    ("cups", "\u{222A}\u{FE00}"),
    ("nvltrie", "\u{22B4}\u{20D2}"),
    ("nvrtrie", "\u{22B5}\u{20D2}"),
    ("nang", "\u{2220}\u{20D2}"),
    ("race", "\u{223D}\u{0331}"),
    ("acE", "\u{223E}\u{0333}"),
    ("ncongdot", "\u{2A6D}\u{0338}"),
    ("lates", "\u{2AAD}\u{FE00}"),
    ("npre", "\u{2AAF}\u{0338}"),
    ("NotPrecedesEqual", "\u{2AAF}\u{0338}"),
    ("nsce", "\u{2AB0}\u{0338}"),
    ("NotSucceedsEqual", "\u{2AB0}\u{0338}"),
    ("nsubE", "\u{2AC5}\u{0338}"),
    ("nsupE", "\u{2AC6}\u{0338}"),
    ("nparsl", "\u{2AFD}\u{20E5}"),
    ("nrarrw", "\u{219D}\u{0338}"),
    ("nrarrc", "\u{2933}\u{0338}"),
];

/// The historical names browsers accept without a terminating semicolon.
pub const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml",
    "LT", "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG",
    "THORN", "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute",
    "aelig", "agrave", "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent",
    "copy", "curren", "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12",
    "frac14", "frac34", "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo",
    "lt", "macr", "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve",
    "ordf", "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo",
    "reg", "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc",
    "ugrave", "uml", "uuml", "yacute", "yen", "yuml",
];

static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ENTITY_TABLE.iter().copied().collect());

static LEGACY_NAMES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| LEGACY_ENTITIES.iter().copied().collect());

/// Look up a name that was followed by `;` in the input.
///
/// `name` excludes both the leading `&` and the trailing `;`.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Look up a name that was not followed by `;`. Only the legacy names match.
#[must_use]
pub fn lookup_legacy_entity(name: &str) -> Option<&'static str> {
    if LEGACY_NAMES.contains(name) {
        lookup_entity(name)
    } else {
        None
    }
}

/// Number of names in the table.
#[must_use]
pub fn entity_count() -> usize {
    NAMED_ENTITIES.len()
}
