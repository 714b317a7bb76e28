//! 파일 선택 대화상자 협력자.

use std::path::PathBuf;

/// 파일 형식 필터 하나.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub extension: String,
    pub description: String,
}

/// 열기 대화상자에 넘길 요청.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenFileRequest {
    pub title: String,
    pub filters: Vec<FileFilter>,
    pub default_extension: Option<String>,
    pub check_file_exists: bool,
}

impl OpenFileRequest {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn add_filter(mut self, extension: &str, description: &str) -> Self {
        self.filters.push(FileFilter {
            extension: extension.to_string(),
            description: description.to_string(),
        });
        self
    }

    pub fn default_extension(mut self, extension: &str) -> Self {
        self.default_extension = Some(extension.to_string());
        self
    }

    pub fn check_file_exists(mut self, check: bool) -> Self {
        self.check_file_exists = check;
        self
    }
}

/// 열 파일 이름을 묻는다. 사용자가 취소하면 `None`.
pub trait FileNamePrompt {
    fn ask_open(&mut self, request: &OpenFileRequest) -> Option<PathBuf>;
}

/// `rfd` 네이티브 대화상자를 쓰는 구현.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdFilePrompt;

impl FileNamePrompt for RfdFilePrompt {
    fn ask_open(&mut self, request: &OpenFileRequest) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title(request.title.as_str());
        for filter in &request.filters {
            dialog = dialog.add_filter(filter.description.as_str(), &[filter.extension.as_str()]);
        }
        let mut path = dialog.pick_file()?;
        if path.extension().is_none() {
            if let Some(ext) = &request.default_extension {
                path.set_extension(ext);
            }
        }
        if request.check_file_exists && !path.exists() {
            tracing::warn!(path = %path.display(), "선택한 파일이 없습니다");
            return None;
        }
        Some(path)
    }
}
