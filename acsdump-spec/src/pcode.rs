//! # PCode Opcode Metadata
//!
//! The instruction set is stack-oriented with 385 opcodes. This module
//! holds the static metadata table indexed by opcode id: the display
//! mnemonic and the operand encoding class the disassembler dispatches
//! on.
//!
//! ## Encodings
//!
//! Wide bytecode stores opcodes and most immediates as 32-bit
//! little-endian integers. Compact bytecode ("small code") stores the
//! opcode as one byte, or two when the first byte is at least 240, and
//! shrinks most immediates to one unsigned byte.
//!
//! Mnemonics reproduce the reference table byte-for-byte, including a
//! few entries that look like upstream typos; renaming them would change
//! output that downstream tooling compares against.

use serde::{Deserialize, Serialize};

/// Operand encoding class of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgKind {
    /// No operands.
    None,
    /// One integer operand; a single unsigned byte under the compact
    /// encoding. Covers every variable and array read-modify opcode,
    /// the stack-argument line specials, and direct calls.
    Scaled,
    /// Fixed run of 32-bit integers, unaffected by the encoding.
    Words(u8),
    /// Special id (one byte under the compact encoding), then n 32-bit
    /// arguments.
    SpecDirect(u8),
    /// Special id and n arguments, all single bytes in either encoding.
    SpecDirectBytes(u8),
    /// Fixed run of byte operands.
    Bytes(u8),
    /// Count byte followed by that many byte operands.
    CountedBytes,
    /// Case count and (value, target) pairs, 4-byte aligned in the file.
    SortedCaseTable,
    /// Argument count and function index.
    FuncCall,
}

/// Metadata for one opcode.
#[derive(Clone, Copy, Debug)]
pub struct PcodeInfo {
    pub mnemonic: &'static str,
    pub args: ArgKind,
}

/// Total number of opcodes in the instruction set.
pub const PCODE_TOTAL: usize = 385;

const fn op(mnemonic: &'static str, args: ArgKind) -> PcodeInfo {
    PcodeInfo { mnemonic, args }
}

use ArgKind as A;

/// Opcode metadata, indexed by opcode id.
pub static PCODES: [PcodeInfo; PCODE_TOTAL] = [
    op("nop",                     A::None),  // 0
    op("terminate",               A::None),
    op("suspend",                 A::None),
    op("pushnumber",              A::Words(1)),
    op("lspec1",                  A::Scaled),
    op("lspec2",                  A::Scaled),
    op("lspec3",                  A::Scaled),
    op("lspec4",                  A::Scaled),
    op("lspec5",                  A::Scaled),
    op("lspec1direct",            A::SpecDirect(1)),
    op("lspec2direct",            A::SpecDirect(2)),  // 10
    op("lspec3direct",            A::SpecDirect(3)),
    op("lspec4direct",            A::SpecDirect(4)),
    op("lspec5direct",            A::SpecDirect(5)),
    op("add",                     A::None),
    op("subtract",                A::None),
    op("multiply",                A::None),
    op("divide",                  A::None),
    op("modulus",                 A::None),
    op("eq",                      A::None),
    op("ne",                      A::None),  // 20
    op("lt",                      A::None),
    op("gt",                      A::None),
    op("le",                      A::None),
    op("ge",                      A::None),
    op("assignscriptvar",         A::Scaled),
    op("assignmapvar",            A::Scaled),
    op("assignworldvar",          A::Scaled),
    op("pushscriptvar",           A::Scaled),
    op("pushmapvar",              A::Scaled),
    op("pushworldvar",            A::Scaled),  // 30
    op("addscriptvar",            A::Scaled),
    op("addmapvar",               A::Scaled),
    op("addworldvar",             A::Scaled),
    op("subscriptvar",            A::Scaled),
    op("submapvar",               A::Scaled),
    op("subworldvar",             A::Scaled),
    op("mulscriptvar",            A::Scaled),
    op("mulmapvar",               A::Scaled),
    op("mulworldvar",             A::Scaled),
    op("divscriptvar",            A::Scaled),  // 40
    op("divmapvar",               A::Scaled),
    op("divworldvar",             A::Scaled),
    op("modscriptvar",            A::Scaled),
    op("modmapvar",               A::Scaled),
    op("modworldvar",             A::Scaled),
    op("incscriptvar",            A::Scaled),
    op("incmapvar",               A::Scaled),
    op("incworldvar",             A::Scaled),
    op("decscriptvar",            A::Scaled),
    op("decmapvar",               A::Scaled),  // 50
    op("decworldvar",             A::Scaled),
    op("goto",                    A::Words(1)),
    op("ifgoto",                  A::Words(1)),
    op("drop",                    A::None),
    op("delay",                   A::None),
    op("delaydirect",             A::Words(1)),
    op("random",                  A::None),
    op("randomdirect",            A::Words(2)),
    op("thingcount",              A::None),
    op("thingcountdirect",        A::Words(2)),  // 60
    op("tagwait",                 A::None),
    op("tagwaitdirect",           A::Words(1)),
    op("polywait",                A::None),
    op("polywaitdirect",          A::Words(1)),
    op("changefloor",             A::None),
    op("changefloordirect",       A::Words(2)),
    op("changeceiling",           A::None),
    op("changeceilingdirect",     A::Words(2)),
    op("restart",                 A::None),
    op("andlogical",              A::None),  // 70
    op("orlogical",               A::None),
    op("andbitwise",              A::None),
    op("orbitwise",               A::None),
    op("eorbitwise",              A::None),
    op("negatelogical",           A::None),
    op("lshift",                  A::None),
    op("rshift",                  A::None),
    op("unaryminus",              A::None),
    op("ifnotgoto",               A::Words(1)),
    op("lineside",                A::None),  // 80
    op("scriptwait",              A::None),
    op("scriptwaitdirect",        A::Words(1)),
    op("clearlinespecial",        A::None),
    op("casegoto",                A::Words(2)),
    op("beginprint",              A::None),
    op("endprint",                A::None),
    op("printstring",             A::None),
    op("printnumber",             A::None),
    op("printcharacter",          A::None),
    op("playercount",             A::None),  // 90
    op("gametype",                A::None),
    op("gameskill",               A::None),
    op("timer",                   A::None),
    op("sectorsound",             A::None),
    op("ambientsound",            A::None),
    op("soundsequence",           A::None),
    op("setlinetexture",          A::None),
    op("setlineblocking",         A::None),
    op("setlinespecial",          A::None),
    op("thingsound",              A::None),  // 100
    op("endprintbold",            A::None),
    op("activatorsound",          A::None),
    op("ambientsound",            A::None),  // upstream table duplicates the ambientsound mnemonic here
    op("setlinemonsterblocking",  A::None),
    op("playerblueskull",         A::None),
    op("playerredskull",          A::None),
    op("playeryellowskull",       A::None),
    op("playermasterskull",       A::None),
    op("playerbluecard",          A::None),
    op("playerredcard",           A::None),  // 110
    op("playeryellowcard",        A::None),
    op("playermastercard",        A::None),
    op("playerblackskull",        A::None),
    op("playersilverskull",       A::None),
    op("playergoldskull",         A::None),
    op("playerblackcard",         A::None),
    op("playersilvercard",        A::None),
    op("ismultiplayer",           A::None),
    op("playerteam",              A::None),
    op("playerhealth",            A::None),  // 120
    op("playerarmorpoints",       A::None),
    op("playerfrags",             A::None),
    op("playerexpert",            A::None),
    op("blueteamcount",           A::None),
    op("redteamcount",            A::None),
    op("blueteamscore",           A::None),
    op("redteamscore",            A::None),
    op("isoneflagctf",            A::None),
    op("getinvasionwave",         A::None),
    op("getinvastionstate",       A::None),  // upstream typo, kept for output compatibility
    op("printname",               A::None),
    op("musicchange",             A::None),
    op("consolecommanddirect",    A::Words(3)),
    op("consolecommand",          A::None),
    op("singleplayer",            A::None),
    op("fixedmul",                A::None),
    op("fixeddiv",                A::None),
    op("setgravity",              A::None),
    op("setgravitydirect",        A::Words(1)),
    op("setaircontrol",           A::None),  // 140
    op("setaircontroldirect",     A::Words(1)),
    op("clearinventory",          A::None),
    op("giveinventory",           A::None),
    op("giveinventorydirect",     A::Words(2)),
    op("takeinventory",           A::None),
    op("takeinventorydirect",     A::Words(2)),
    op("checkinventory",          A::None),
    op("checkinventorydirect",    A::Words(1)),
    op("spawn",                   A::None),
    op("spawndirect",             A::Words(6)),  // 150
    op("spawnspot",               A::None),
    op("spawnspotdirect",         A::Words(4)),
    op("setmusic",                A::None),
    op("setmusicdirect",          A::Words(3)),
    op("localsetmusic",           A::None),
    op("localsetmusicdirect",     A::Words(3)),
    op("printfixed",              A::None),
    op("printlocalized",          A::None),
    op("morehudmessage",          A::None),
    op("opthudmessage",           A::None),  // 160
    op("endhudmessage",           A::None),
    op("endhudmessagebold",       A::None),
    op("setstyle",                A::None),
    op("setstyledirect",          A::None),
    op("setfont",                 A::None),
    op("setfontdirect",           A::Words(1)),
    op("pushbyte",                A::Bytes(1)),
    op("lspec1directb",           A::SpecDirectBytes(1)),
    op("lspec2directb",           A::SpecDirectBytes(2)),
    op("lspec3directb",           A::SpecDirectBytes(3)),  // 170
    op("lspec4directb",           A::SpecDirectBytes(4)),
    op("lspec5directb",           A::SpecDirectBytes(5)),
    op("delaydirectb",            A::Bytes(1)),
    op("randomdirectb",           A::Bytes(2)),
    op("pushbytes",               A::CountedBytes),
    op("push2bytes",              A::Bytes(2)),
    op("push3bytes",              A::Bytes(3)),
    op("push4bytes",              A::Bytes(4)),
    op("push5bytes",              A::Bytes(5)),
    op("setthingspecial",         A::None),  // 180
    op("assignglobalvar",         A::Scaled),
    op("pushglobalvar",           A::Scaled),
    op("addglobalvar",            A::Scaled),
    op("subglobalvar",            A::Scaled),
    op("mulglobalvar",            A::Scaled),
    op("divglobalvar",            A::Scaled),
    op("modglobalvar",            A::Scaled),
    op("incglobalvar",            A::Scaled),
    op("decglobalvar",            A::Scaled),
    op("fadeto",                  A::None),  // 190
    op("faderange",               A::None),
    op("cancelfade",              A::None),
    op("playmovie",               A::None),
    op("setfloortrigger",         A::None),
    op("setceilingtrigger",       A::None),
    op("getactorx",               A::None),
    op("getactory",               A::None),
    op("getactorz",               A::None),
    op("starttranslation",        A::None),
    op("translationrange1",       A::None),  // 200
    op("translationrange2",       A::None),
    op("endtranslation",          A::None),
    op("call",                    A::Scaled),
    op("calldiscard",             A::Scaled),
    op("returnvoid",              A::None),
    op("returnval",               A::None),
    op("pushmaparray",            A::Scaled),
    op("assignmaparray",          A::Scaled),
    op("addmaparray",             A::Scaled),
    op("submaparray",             A::Scaled),  // 210
    op("mulmaparray",             A::Scaled),
    op("divmaparray",             A::Scaled),
    op("modmaparray",             A::Scaled),
    op("incmaparray",             A::Scaled),
    op("decmaparray",             A::Scaled),
    op("dup",                     A::None),
    op("swap",                    A::None),
    op("writetoini",              A::None),
    op("getfromini",              A::None),
    op("sin",                     A::None),  // 220
    op("cos",                     A::None),
    op("vectorangle",             A::None),
    op("checkweapon",             A::None),
    op("setweapon",               A::None),
    op("tagstring",               A::None),
    op("pushworldarray",          A::Scaled),
    op("assignworldarray",        A::Scaled),
    op("addworldarray",           A::Scaled),
    op("subworldarray",           A::Scaled),
    op("mulworldarray",           A::Scaled),  // 230
    op("divworldarray",           A::Scaled),
    op("modworldarray",           A::Scaled),
    op("incworldarray",           A::Scaled),
    op("decworldarray",           A::Scaled),
    op("pushglobalarray",         A::Scaled),
    op("assignglobalarray",       A::Scaled),
    op("addglobalarray",          A::Scaled),
    op("subglobalarray",          A::Scaled),
    op("mulglobalarray",          A::Scaled),
    op("divglobalarray",          A::Scaled),  // 240
    op("modglobalarray",          A::Scaled),
    op("incglobalarray",          A::Scaled),
    op("decglobalarray",          A::Scaled),
    op("setmarineweapon",         A::None),
    op("setactorproperty",        A::None),
    op("getactorproperty",        A::None),
    op("playernumber",            A::None),
    op("activatortid",            A::None),
    op("setmarinesprite",         A::None),
    op("getscreenwidth",          A::None),  // 250
    op("getscreenheight",         A::None),
    op("thingprojectile2",        A::None),
    op("strlen",                  A::None),
    op("gethudsize",              A::None),  // upstream table says get, not set; kept as-is
    op("getcvar",                 A::None),
    op("casegotosorted",          A::SortedCaseTable),
    op("setresultvalue",          A::None),
    op("getlinerowoffset",        A::None),
    op("getactorfloorz",          A::None),
    op("getactorangle",           A::None),  // 260
    op("getsectorfloorz",         A::None),
    op("getsectorceilingz",       A::None),
    op("lspec5result",            A::Scaled),
    op("getsigilpieces",          A::None),
    op("getlevelinfo",            A::None),
    op("changesky",               A::None),
    op("playeringame",            A::None),
    op("playerisbot",             A::None),
    op("setcameratotexture",      A::None),
    op("endlog",                  A::None),  // 270
    op("getammocapacity",         A::None),
    op("setammocapacity",         A::None),
    op("printmapchararray",       A::None),
    op("printworldchararray",     A::None),
    op("printglobalchararray",    A::None),
    op("setactorangle",           A::None),
    op("grabinput",               A::None),
    op("setmousepointer",         A::None),
    op("movemousepointer",        A::None),
    op("spawnprojectile",         A::None),  // 280
    op("getsectorlightlevel",     A::None),
    op("getactorceilingz",        A::None),
    op("setactorposition",        A::None),
    op("clearactorinventory",     A::None),
    op("giveactorinventory",      A::None),
    op("takeactorinventory",      A::None),
    op("checkactorinventory",     A::None),
    op("thingcountname",          A::None),
    op("spawnspotfacing",         A::None),
    op("playerclass",             A::None),  // 290
    op("andscriptvar",            A::Scaled),
    op("andmapvar",               A::Scaled),
    op("andworldvar",             A::Scaled),
    op("andglobalvar",            A::Scaled),
    op("andmaparray",             A::Scaled),
    op("andworldarray",           A::Scaled),
    op("andglobalarray",          A::Scaled),
    op("eorscriptvar",            A::Scaled),
    op("eormapvar",               A::Scaled),
    op("eorworldvar",             A::Scaled),  // 300
    op("eorglobalvar",            A::Scaled),
    op("eormaparray",             A::Scaled),
    op("eorworldarray",           A::Scaled),
    op("eorglobalarray",          A::Scaled),
    op("orscriptvar",             A::Scaled),
    op("ormapvar",                A::Scaled),
    op("orworldvar",              A::Scaled),
    op("orglobalvar",             A::Scaled),
    op("ormaparray",              A::Scaled),
    op("orworldarray",            A::Scaled),  // 310
    op("orglobalarray",           A::Scaled),
    op("lsscriptvar",             A::Scaled),
    op("lsmapvar",                A::Scaled),
    op("lsworldvar",              A::Scaled),
    op("lsglobalvar",             A::Scaled),
    op("lsmaparray",              A::Scaled),
    op("lsworldarray",            A::Scaled),
    op("lsglobalarray",           A::Scaled),
    op("rsscriptvar",             A::Scaled),
    op("rsmapvar",                A::Scaled),  // 320
    op("rsworldvar",              A::Scaled),
    op("rsglobalvar",             A::Scaled),
    op("rsmaparray",              A::Scaled),
    op("rsworldarray",            A::Scaled),
    op("rsglobalarray",           A::Scaled),
    op("getplayerinfo",           A::None),
    op("changelevel",             A::None),
    op("sectordamage",            A::None),
    op("replacetextures",         A::None),
    op("negatebinary",            A::None),  // 330
    op("getactorpitch",           A::None),
    op("setactorpitch",           A::None),
    op("printbind",               A::None),
    op("setactorstate",           A::None),
    op("thingdamage2",            A::None),
    op("useinventory",            A::None),
    op("useactorinventory",       A::None),
    op("checkactorceilingtexture", A::None),
    op("checkactorfloortexture",  A::None),
    op("getactorlightlevel",      A::None),  // 340
    op("setmugshotstate",         A::None),
    op("thingcountsector",        A::None),
    op("thingcountnamesector",    A::None),
    op("checkplayercamera",       A::None),
    op("morphactor",              A::None),
    op("unmorphactor",            A::None),
    op("getplayerinput",          A::None),
    op("classifyactor",           A::None),
    op("printbinary",             A::None),
    op("printhex",                A::None),  // 350
    op("callfunc",                A::FuncCall),
    op("savestring",              A::None),
    op("printmapchrange",         A::None),
    op("printworldchrange",       A::None),
    op("printglobalchrange",      A::None),
    op("strcpytomapchrange",      A::None),
    op("strcpytoworldchrange",    A::None),
    op("strcpytoglobalchrange",   A::None),
    op("pushfunction",            A::Scaled),
    op("callstack",               A::None),  // 360
    op("scriptwaitnamed",         A::None),
    op("translationrange3",       A::None),
    op("gotostack",               A::None),
    op("assignscriptarray",       A::Scaled),
    op("pushscriptarray",         A::Scaled),
    op("addscriptarray",          A::Scaled),
    op("subscriptarray",          A::Scaled),
    op("mulscriptarray",          A::Scaled),
    op("divscriptarray",          A::Scaled),
    op("modscriptarray",          A::Scaled),  // 370
    op("incscriptarray",          A::Scaled),
    op("decscriptarray",          A::Scaled),
    op("andscriptarray",          A::Scaled),
    op("eorscriptarray",          A::Scaled),
    op("orscriptarray",           A::Scaled),
    op("lsscriptarray",           A::Scaled),
    op("rsscriptarray",           A::Scaled),
    op("printscriptchararray",    A::None),
    op("printscriptchrange",      A::None),
    op("strcpytoscriptchrange",   A::None),  // 380
    op("lspec5ex",                A::Words(1)),
    op("lspec5exresult",          A::Words(1)),
    op("translationrange4",       A::None),
    op("translationrange5",       A::None),
];

/// Metadata for an opcode id, or `None` when the id falls outside the
/// instruction set.
pub fn pcode_info(id: i32) -> Option<&'static PcodeInfo> {
    usize::try_from(id).ok().and_then(|id| PCODES.get(id))
}
