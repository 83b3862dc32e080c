//! Mapping from record kinds to payload handling.

use core::fmt;

use tartan_bitfield::bitfield;

/// Bit of the raw kind word marking a block-compressed payload.
pub const COMPRESSED_FLAG: u32 = 1 << 6;

/// A raw record kind, as read from a frame header.
///
/// The compression flag is carried alongside the base kind. Use
/// [`Kind::base`] for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind(pub u32);

impl Kind {
    /// The kind code with the compression flag masked off.
    pub const fn base(self) -> u32 {
        self.0 & !COMPRESSED_FLAG
    }

    /// Whether the payload of this frame is block-compressed.
    pub fn is_compressed(self) -> bool {
        bitfield! {
            struct KindWord(u32) {
                [6] is_compressed,
            }
        }

        KindWord(self.0).is_compressed()
    }

    /// The payload class selected by the base kind.
    pub fn class(self) -> PayloadClass {
        classify(self.base()).0
    }

    /// Whether the payload holds nested data not handled by a schema decoder.
    pub fn is_embedded(self) -> bool {
        classify(self.base()).1
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.class(), self.0)
    }
}

impl From<u32> for Kind {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// The class of message carried by a frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadClass {
    Stop,
    FileHeader,
    FileInfo,
    SyncTick,
    SendTables,
    ClassInfo,
    StringTables,
    Packet,
    SignonPacket,
    ConsoleCmd,
    CustomData,
    CustomDataCallbacks,
    UserCmd,
    FullPacket,
    SaveGame,
    SpawnGroups,
    /// A kind this decoder does not recognise.
    Unknown,
}

impl PayloadClass {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "Stop",
            Self::FileHeader => "FileHeader",
            Self::FileInfo => "FileInfo",
            Self::SyncTick => "SyncTick",
            Self::SendTables => "SendTables",
            Self::ClassInfo => "ClassInfo",
            Self::StringTables => "StringTables",
            Self::Packet => "Packet",
            Self::SignonPacket => "SignonPacket",
            Self::ConsoleCmd => "ConsoleCmd",
            Self::CustomData => "CustomData",
            Self::CustomDataCallbacks => "CustomDataCallbacks",
            Self::UserCmd => "UserCmd",
            Self::FullPacket => "FullPacket",
            Self::SaveGame => "SaveGame",
            Self::SpawnGroups => "SpawnGroups",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PayloadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEntry {
    pub class: PayloadClass,
    pub is_embedded: bool,
}

const fn entry(class: PayloadClass, is_embedded: bool) -> DispatchEntry {
    DispatchEntry { class, is_embedded }
}

/// Dispatch table indexed by base kind code.
pub static DISPATCH: [DispatchEntry; 16] = [
    entry(PayloadClass::Stop, false),
    entry(PayloadClass::FileHeader, false),
    entry(PayloadClass::FileInfo, false),
    entry(PayloadClass::SyncTick, false),
    entry(PayloadClass::SendTables, true),
    entry(PayloadClass::ClassInfo, false),
    entry(PayloadClass::StringTables, false),
    entry(PayloadClass::Packet, true),
    entry(PayloadClass::SignonPacket, true),
    entry(PayloadClass::ConsoleCmd, false),
    entry(PayloadClass::CustomData, false),
    entry(PayloadClass::CustomDataCallbacks, false),
    entry(PayloadClass::UserCmd, false),
    entry(PayloadClass::FullPacket, true),
    entry(PayloadClass::SaveGame, false),
    entry(PayloadClass::SpawnGroups, false),
];

/// Resolve a base kind code to its payload class and embedded flag.
///
/// Total over `u32`: codes outside the table are [`PayloadClass::Unknown`]
/// and not embedded.
pub fn classify(base: u32) -> (PayloadClass, bool) {
    match DISPATCH.get(base as usize) {
        Some(&DispatchEntry { class, is_embedded }) => (class, is_embedded),
        None => (PayloadClass::Unknown, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_by_code() {
        let codes = [
            (0, PayloadClass::Stop),
            (1, PayloadClass::FileHeader),
            (2, PayloadClass::FileInfo),
            (3, PayloadClass::SyncTick),
            (4, PayloadClass::SendTables),
            (5, PayloadClass::ClassInfo),
            (6, PayloadClass::StringTables),
            (7, PayloadClass::Packet),
            (8, PayloadClass::SignonPacket),
            (9, PayloadClass::ConsoleCmd),
            (10, PayloadClass::CustomData),
            (11, PayloadClass::CustomDataCallbacks),
            (12, PayloadClass::UserCmd),
            (13, PayloadClass::FullPacket),
            (14, PayloadClass::SaveGame),
            (15, PayloadClass::SpawnGroups),
        ];

        for (code, class) in codes {
            assert_eq!(classify(code).0, class, "code {code}");
        }
    }

    #[test]
    fn embedded_classes() {
        let embedded: [u32; 4] = [4, 7, 8, 13];

        for code in 0..16 {
            assert_eq!(classify(code).1, embedded.contains(&code), "code {code}");
        }
    }

    #[test]
    fn unknown_codes() {
        for code in [16, 17, 63, 65, 1000, u32::MAX] {
            assert_eq!(classify(code), (PayloadClass::Unknown, false));
        }
    }

    #[test]
    fn compression_flag_is_masked_for_dispatch() {
        let kind = Kind(COMPRESSED_FLAG | 1);
        assert!(kind.is_compressed());
        assert_eq!(kind.base(), 1);
        assert_eq!(kind.class(), PayloadClass::FileHeader);

        let kind = Kind(7);
        assert!(!kind.is_compressed());
        assert!(kind.is_embedded());
    }
}
