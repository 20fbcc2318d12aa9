//! Static reference data for the analysis pipeline
//!
//! All comparisons elsewhere in the crate are case-insensitive; the lexicon
//! normalizes everything to lowercase once at construction so callers can
//! match against it directly.

use std::collections::HashSet;

/// Skill category used for role inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillBucket {
    Frontend,
    Backend,
    Data,
    DevOps,
}

/// Read-only provider of the fixed reference sets used across the pipeline
pub struct Lexicon {
    tech_skills: Vec<String>,
    skill_index: HashSet<String>,
    role_titles: Vec<String>,
    responsibility_headers: Vec<String>,
    requirement_headers: Vec<String>,
    company_markers: Vec<String>,
    job_content_markers: Vec<String>,
    skill_markers: Vec<String>,
    frontend_skills: HashSet<String>,
    backend_skills: HashSet<String>,
    data_skills: HashSet<String>,
    devops_skills: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            tech_skills: lowercase_all(TECH_SKILLS),
            skill_index: TECH_SKILLS.iter().map(|s| s.to_lowercase()).collect(),
            role_titles: lowercase_all(ROLE_TITLES),
            responsibility_headers: lowercase_all(RESPONSIBILITY_HEADERS),
            requirement_headers: lowercase_all(REQUIREMENT_HEADERS),
            company_markers: lowercase_all(COMPANY_MARKERS),
            job_content_markers: lowercase_all(JOB_CONTENT_MARKERS),
            skill_markers: lowercase_all(SKILL_MARKERS),
            frontend_skills: FRONTEND_SKILLS.iter().map(|s| s.to_lowercase()).collect(),
            backend_skills: BACKEND_SKILLS.iter().map(|s| s.to_lowercase()).collect(),
            data_skills: DATA_SKILLS.iter().map(|s| s.to_lowercase()).collect(),
            devops_skills: DEVOPS_SKILLS.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Known technical skill phrases, lowercase
    pub fn tech_skills(&self) -> &[String] {
        &self.tech_skills
    }

    /// Fast membership test against the skill set
    pub fn is_skill(&self, token: &str) -> bool {
        self.skill_index.contains(token)
    }

    /// Canonical role titles in priority order (ties in frequency counting
    /// resolve to the first title reaching the maximum)
    pub fn role_titles(&self) -> &[String] {
        &self.role_titles
    }

    pub fn responsibility_headers(&self) -> &[String] {
        &self.responsibility_headers
    }

    pub fn requirement_headers(&self) -> &[String] {
        &self.requirement_headers
    }

    /// Company-boilerplate markers used only by the summary cleaner
    pub fn company_markers(&self) -> &[String] {
        &self.company_markers
    }

    /// Job-content markers used only by the summary cleaner
    pub fn job_content_markers(&self) -> &[String] {
        &self.job_content_markers
    }

    /// Skill tokens the summary cleaner strips from prose (skills are
    /// reported separately in the skill set)
    pub fn skill_markers(&self) -> &[String] {
        &self.skill_markers
    }

    /// Category bucket a skill token belongs to, if any. A token can appear
    /// in more than one bucket ("express" is both frontend and backend in the
    /// hand-tuned lists); callers count per bucket, so membership is exposed
    /// per category rather than as a single lookup.
    pub fn in_bucket(&self, skill: &str, bucket: SkillBucket) -> bool {
        match bucket {
            SkillBucket::Frontend => self.frontend_skills.contains(skill),
            SkillBucket::Backend => self.backend_skills.contains(skill),
            SkillBucket::Data => self.data_skills.contains(skill),
            SkillBucket::DevOps => self.devops_skills.contains(skill),
        }
    }
}

fn lowercase_all(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

const TECH_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go", "rust",
    "swift", "kotlin", "scala", "r", "matlab", "perl", "shell", "bash", "sql", "html", "css",
    // Frontend
    "react", "angular", "vue", "sass", "less", "bootstrap", "tailwind", "jquery", "webpack",
    "babel", "npm", "yarn", "next.js", "nuxt.js", "gatsby",
    // Backend
    "node.js", "express", "django", "flask", "fastapi", "spring", "laravel", "rails",
    "asp.net", ".net", "graphql", "rest api", "microservices", "serverless",
    // Databases
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "oracle", "sqlite",
    "cassandra", "dynamodb", "firebase", "supabase",
    // Cloud and DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "github", "gitlab",
    "terraform", "ansible", "linux", "unix", "ci/cd", "devops", "helm",
    // Data science and ML
    "machine learning", "deep learning", "ai", "data science", "pandas", "numpy",
    "tensorflow", "pytorch", "scikit-learn", "jupyter", "tableau", "power bi", "spark",
    "hadoop", "kafka", "airflow",
    // Mobile
    "ios", "android", "react native", "flutter", "xamarin",
    // Other tools
    "agile", "scrum", "jira", "confluence", "slack", "figma", "sketch", "adobe xd",
];

const ROLE_TITLES: &[&str] = &[
    "frontend developer", "backend developer", "fullstack developer", "data scientist",
    "devops engineer", "mobile developer", "qa engineer", "product manager",
    "ui/ux designer", "software engineer", "java developer", "python developer",
    "web developer", "cloud engineer", "data engineer", "machine learning engineer",
    "site reliability engineer", "security engineer", "database administrator",
];

const RESPONSIBILITY_HEADERS: &[&str] = &[
    "responsibilities", "responsibility", "key responsibilities", "duties",
    "tasks", "accountabilities", "what you will do", "your impact", "role",
];

const REQUIREMENT_HEADERS: &[&str] = &[
    "requirements", "qualifications", "skills required", "must have",
    "needed", "what we're looking for", "you bring", "preferred", "nice to have",
];

const COMPANY_MARKERS: &[&str] = &[
    "tradeweb", "amazon", "google", "microsoft", "apple", "facebook", "meta",
    "global leader", "leading", "established", "founded", "headquartered",
    "serving", "serves", "clientele", "customers", "mission", "vision", "values",
    "culture", "benefits", "perks", "insurance", "401k", "equal opportunity",
    "diversity", "inclusive", "eeo", "recognized", "awarded", "ranked",
    "best companies", "trillion", "revenue", "growth", "ipo", "acquisitions",
    "mastech", "pittsburgh", "nyse", "minority-owned", "certified",
];

const JOB_CONTENT_MARKERS: &[&str] = &[
    "responsible", "develop", "create", "build", "design", "implement",
    "programming", "software", "platform", "systems", "features",
    "components", "libraries", "deadlines", "support", "improvements",
    "distributed", "scalable", "microservices", "collaborate", "work with",
    "experience", "requirements", "qualifications", "team", "project",
];

const SKILL_MARKERS: &[&str] = &[
    "angular", "react", "nodejs", "express", "html", "css", "sass", "javascript",
    "java", "spring", "python", "aws", "azure", "docker", "kubernetes",
    "jenkins", "git", "github", "npm", "graphql", "sql", "pl/sql",
];

const FRONTEND_SKILLS: &[&str] = &[
    "react", "angular", "vue", "html", "css", "javascript", "typescript",
    "bootstrap", "tailwind", "jquery", "sass", "express",
];

const BACKEND_SKILLS: &[&str] = &[
    "spring", "django", "flask", "fastapi", "node.js", "express",
    "microservices", "java", "python", "c#", "php", "ruby", "go", "pl/sql",
];

const DATA_SKILLS: &[&str] = &[
    "data science", "machine learning", "pytorch", "tensorflow", "pandas",
    "numpy", "spark", "scikit-learn", "ai", "deep learning",
];

const DEVOPS_SKILLS: &[&str] = &[
    "docker", "kubernetes", "aws", "azure", "gcp", "jenkins", "terraform",
    "ansible", "ci/cd", "devops", "git", "github", "npm",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_never_empty() {
        let lexicon = Lexicon::new();
        assert!(!lexicon.tech_skills().is_empty());
        assert!(!lexicon.role_titles().is_empty());
        assert!(!lexicon.responsibility_headers().is_empty());
        assert!(!lexicon.requirement_headers().is_empty());
        assert!(!lexicon.company_markers().is_empty());
        assert!(!lexicon.job_content_markers().is_empty());
    }

    #[test]
    fn test_everything_lowercased() {
        let lexicon = Lexicon::new();
        for skill in lexicon.tech_skills() {
            assert_eq!(skill, &skill.to_lowercase());
        }
        for title in lexicon.role_titles() {
            assert_eq!(title, &title.to_lowercase());
        }
    }

    #[test]
    fn test_skill_membership() {
        let lexicon = Lexicon::new();
        assert!(lexicon.is_skill("python"));
        assert!(lexicon.is_skill("machine learning"));
        assert!(!lexicon.is_skill("Python"));
        assert!(!lexicon.is_skill("underwater basket weaving"));
    }

    #[test]
    fn test_bucket_membership() {
        let lexicon = Lexicon::new();
        assert!(lexicon.in_bucket("react", SkillBucket::Frontend));
        assert!(lexicon.in_bucket("django", SkillBucket::Backend));
        assert!(lexicon.in_bucket("pytorch", SkillBucket::Data));
        assert!(lexicon.in_bucket("terraform", SkillBucket::DevOps));
        // "express" is deliberately in two buckets
        assert!(lexicon.in_bucket("express", SkillBucket::Frontend));
        assert!(lexicon.in_bucket("express", SkillBucket::Backend));
        assert!(!lexicon.in_bucket("pytorch", SkillBucket::Frontend));
    }
}
