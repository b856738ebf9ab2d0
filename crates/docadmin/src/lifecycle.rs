//! Lifecycle vocabulary for users, keywords and OCR/NLP result rows.
//!
//! Every value is persisted as its exact string label, so the labels here are
//! part of the schema contract shared with the external processing pipeline.

use thiserror::Error;

/// A stored label did not match any variant of the expected enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} label: '{label}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

/// Declares an enum whose variants map one-to-one onto stored string labels.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All variants in declaration order.
            pub const VARIANTS: &'static [$name] = &[$( $name::$variant, )+];

            /// The label stored in the database.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    _ => Err(UnknownLabel {
                        kind: stringify!($name),
                        label: s.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let label = String::deserialize(deserializer)?;
                label.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

labelled_enum! {
    /// Administrative permission level of a user account.
    pub enum Permission {
        None => "NONE",
        Member => "MEMBER",
        Admin => "ADMIN",
    }
}

impl Default for Permission {
    fn default() -> Self {
        Permission::Member
    }
}

labelled_enum! {
    /// Which side of a key/value pair a spell-check rule applies to.
    pub enum KeywordType {
        All => "ALL",
        Key => "KEY",
        Value => "VALUE",
    }
}

impl Default for KeywordType {
    fn default() -> Self {
        KeywordType::All
    }
}

labelled_enum! {
    pub enum ServiceType {
        Ocr => "OCR",
        Nlp => "NLP",
    }
}

labelled_enum! {
    /// Per-file NLP status, driven by whether a contract document was found.
    pub enum NlpResultStatus {
        Waiting => "WAITING",
        Success => "SUCCESS",
        Fail => "FAIL",
        Confirm => "CONFIRM",
    }
}

labelled_enum! {
    /// Status of a whole request (all files sharing a `request_id`).
    pub enum RequestStatus {
        AnalyseWaiting => "WAITING",
        AnalyseCompleted => "SUCCESS",
        AnalyseFailed => "FAIL",
        ConfirmCompleted => "CONFIRM",
    }
}

labelled_enum! {
    pub enum RequestFrom {
        Admin => "ADMIN",
        Agent => "AGENT",
    }
}

labelled_enum! {
    /// Status of a single file within a request.
    pub enum FileStatus {
        Waiting => "WAITING",
        Success => "SUCCESS",
        Fail => "FAIL",
    }
}

labelled_enum! {
    /// Position of a file in the merge/upload/OCR/NLP/confirmation lifecycle.
    ///
    /// Variants are declared in lifecycle order. The merge steps only occur
    /// for requests whose files are merged before upload.
    pub enum FileStep {
        BeforeFileMerging => "Before_File_Merging",
        FileMergeCompleted => "File_Merge_Completed",
        UploadWaiting => "Upload_Waiting",
        UploadCompleted => "Upload_Completed",
        OcrCompleted => "OCR_Completed",
        AnalyseCompleted => "Analyse_Completed",
        ConfirmProcessing => "Confirm_Processing",
        ConfirmCompleted => "Confirm_Completed",
    }
}

impl Default for FileStep {
    fn default() -> Self {
        FileStep::UploadWaiting
    }
}

impl FileStep {
    /// The automatic processing sequence, from upload to analysis.
    pub const SEQ: [FileStep; 4] = [
        FileStep::UploadWaiting,
        FileStep::UploadCompleted,
        FileStep::OcrCompleted,
        FileStep::AnalyseCompleted,
    ];

    /// Steps at which the file itself is known to be readable.
    pub const FILE_SUCCESS: [FileStep; 3] = [
        FileStep::UploadCompleted,
        FileStep::OcrCompleted,
        FileStep::AnalyseCompleted,
    ];

    pub const OCR_SUCCESS: [FileStep; 2] = [FileStep::OcrCompleted, FileStep::AnalyseCompleted];

    pub const CONFIRM_STATUS: [FileStep; 1] = [FileStep::ConfirmCompleted];

    /// Steps at which analysis has produced a usable result.
    pub const SUCCESS_STATUS: [FileStep; 3] = [
        FileStep::AnalyseCompleted,
        FileStep::ConfirmProcessing,
        FileStep::ConfirmCompleted,
    ];

    /// Zero-based position in the lifecycle.
    pub fn ordinal(&self) -> usize {
        match self {
            FileStep::BeforeFileMerging => 0,
            FileStep::FileMergeCompleted => 1,
            FileStep::UploadWaiting => 2,
            FileStep::UploadCompleted => 3,
            FileStep::OcrCompleted => 4,
            FileStep::AnalyseCompleted => 5,
            FileStep::ConfirmProcessing => 6,
            FileStep::ConfirmCompleted => 7,
        }
    }

    /// The step that normally follows this one, if any.
    pub fn next(&self) -> Option<FileStep> {
        Self::VARIANTS.get(self.ordinal() + 1).copied()
    }

    /// Whether moving from `self` to `target` goes strictly forward.
    ///
    /// Skipping steps is allowed (a file that is not merged starts at
    /// `Upload_Waiting`); staying in place or moving backward is not.
    pub fn can_advance_to(&self, target: FileStep) -> bool {
        target.ordinal() > self.ordinal()
    }

    /// The processing stage completed by reaching this step, recorded in the
    /// `success_step` column.
    pub fn completed_stage(&self) -> Option<OcrNlpStep> {
        match self {
            FileStep::FileMergeCompleted => Some(OcrNlpStep::FileMerge),
            FileStep::UploadCompleted => Some(OcrNlpStep::FileProcess),
            FileStep::OcrCompleted => Some(OcrNlpStep::OcrProcess),
            FileStep::AnalyseCompleted => Some(OcrNlpStep::NlpProcess),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        Self::SUCCESS_STATUS.contains(self)
    }

    pub fn is_confirmed(&self) -> bool {
        Self::CONFIRM_STATUS.contains(self)
    }
}

labelled_enum! {
    /// Failure cause recorded for a whole request.
    pub enum ReqError {
        AllFailed => "ALL Failed",
        ContractFailed => "Contract Failed",
    }
}

labelled_enum! {
    /// Failure cause recorded for a single file.
    pub enum FileError {
        AnalyseStopping => "Analyse Stopping Error",
        AnalyseStopped => "Analyse Stopped Error",
        OcrFailed => "OCR Error",
        NlpFailed => "NLP Error",
        FileFailed => "File Error",
        DbFailed => "DB Error",
        SysFailed => "System Error",
        MergeFailed => "Merge Error",
        ExtensionError => "Extension Error",
        ImgSystemError => "IMG System Error",
        NlpConnectionError => "NLP Connection Error",
        AdminError => "Admin Error",
        ClassifierError => "Classifier Error",
        NerError => "NER Error",
        SpellCheckerError => "Spell_checker Error",
        ImgPackageError => "IMG_package Error",
        TemplateError => "Template Error",
        MapperError => "Mapper Error",
        PostprocessorError => "Postprocessor Error",
        KeywordSearcherError => "Keyword_searcher Error",
        FileNotFoundError => "File Not Found Error",
        NlpSystemError => "NLP System Error",
        DamagedFileError => "Damaged File Error",
    }
}

impl FileError {
    /// Causes that an operator must review before a result can be confirmed.
    pub const CONFIRMED_CHECK_LIST: [FileError; 8] = [
        FileError::OcrFailed,
        FileError::NlpFailed,
        FileError::FileFailed,
        FileError::DbFailed,
        FileError::SysFailed,
        FileError::MergeFailed,
        FileError::ExtensionError,
        FileError::ImgSystemError,
    ];

    pub const ERRORS_ALL: [FileError; 6] = [
        FileError::AnalyseStopping,
        FileError::AnalyseStopped,
        FileError::OcrFailed,
        FileError::NlpFailed,
        FileError::FileFailed,
        FileError::DbFailed,
    ];

    pub fn requires_confirmation_check(&self) -> bool {
        Self::CONFIRMED_CHECK_LIST.contains(self)
    }
}

labelled_enum! {
    /// Coarse processing stage, stored in `success_step`.
    pub enum OcrNlpStep {
        FileMerge => "FILE MERGE",
        FileProcess => "FILE PROCESS",
        OcrProcess => "OCR PROCESS",
        NlpProcess => "NLP PROCESS",
    }
}

impl OcrNlpStep {
    /// Stage order for the automatic pipeline; `None` means nothing succeeded yet.
    pub const SEQ: [Option<OcrNlpStep>; 4] = [
        None,
        Some(OcrNlpStep::FileProcess),
        Some(OcrNlpStep::OcrProcess),
        Some(OcrNlpStep::NlpProcess),
    ];
}

labelled_enum! {
    /// Error labels reported by the NLP engine.
    pub enum NlpErrorStep {
        NlpError => "NLP Error",
        NlpConnectionError => "NLP Connection Error",
        AdminError => "Admin Error",
        OcrError => "OCR Error",
        ClassifierError => "Classifier Error",
        NerError => "NER Error",
        SpellCheckerError => "Spell_checker Error",
        ImgPackageError => "IMG_package Error",
        TemplateError => "Template Error",
        MapperError => "Mapper Error",
        PostprocessorError => "Postprocessor Error",
        KeywordSearcherError => "Keyword_searcher Error",
        FileNotFoundError => "File Not Found Error",
        NlpSystemError => "NLP System Error",
    }
}

impl From<NlpErrorStep> for FileError {
    fn from(step: NlpErrorStep) -> Self {
        match step {
            NlpErrorStep::NlpError => FileError::NlpFailed,
            NlpErrorStep::NlpConnectionError => FileError::NlpConnectionError,
            NlpErrorStep::AdminError => FileError::AdminError,
            NlpErrorStep::OcrError => FileError::OcrFailed,
            NlpErrorStep::ClassifierError => FileError::ClassifierError,
            NlpErrorStep::NerError => FileError::NerError,
            NlpErrorStep::SpellCheckerError => FileError::SpellCheckerError,
            NlpErrorStep::ImgPackageError => FileError::ImgPackageError,
            NlpErrorStep::TemplateError => FileError::TemplateError,
            NlpErrorStep::MapperError => FileError::MapperError,
            NlpErrorStep::PostprocessorError => FileError::PostprocessorError,
            NlpErrorStep::KeywordSearcherError => FileError::KeywordSearcherError,
            NlpErrorStep::FileNotFoundError => FileError::FileNotFoundError,
            NlpErrorStep::NlpSystemError => FileError::NlpSystemError,
        }
    }
}
