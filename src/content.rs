#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub icon: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub link: &'static str,
    pub image: Option<&'static str>,
}

impl Project {
    /// Image to show, or nothing once it has failed to load.
    pub fn image_src(&self, load_failed: bool) -> Option<&'static str> {
        self.image.filter(|_| !load_failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResumeAsset {
    pub path: &'static str,
    pub download_name: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortfolioContent {
    pub name: &'static str,
    pub tagline: &'static str,
    pub about: &'static [&'static str],
    pub skills: &'static [Skill],
    pub projects: &'static [Project],
    pub contact_blurb: &'static str,
    pub email: &'static str,
    pub socials: &'static [SocialLink],
    pub resume: ResumeAsset,
    pub animation_url: &'static str,
}

impl PortfolioContent {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

pub static PORTFOLIO: PortfolioContent = PortfolioContent {
    name: "Nirvan Naveen",
    tagline: "AI Enthusiast & Full-Stack Developer",
    about: &[
        "I'm a passionate and project-driven developer currently pursuing my B.Tech in Computer Science. I enjoy creating real-world solutions that bring together AI, multimodal processing, and innovative design.",
        "Over the past few years, I've led and contributed to several impactful projects, from building a local multimodal assistant that processes documents, images, and videos offline, to developing AI-powered news summarization platforms and deep learning systems for medical imaging analysis.",
        "My work focuses on blending intelligence with usability, and I'm deeply interested in crafting secure, efficient, and scalable tech solutions. Outside of academics and projects, I'm passionate about football, sports, and music. I was proud to serve as the Captain of the B Team at Woxsen University, leading my team with dedication and teamwork both on and off the field.",
        "I'm always excited to take on new challenges, work on meaningful projects, and keep evolving through building technology and growing personally. I look forward to opportunities that combine my project experience with new learning and real-world impact.",
    ],
    skills: &[
        Skill { name: "Python", icon: "🐍" },
        Skill { name: "C", icon: "💻" },
        Skill { name: "React", icon: "⚛️" },
        Skill { name: "TensorFlow/Keras", icon: "🧠" },
        Skill { name: "OpenCV", icon: "👁️" },
        Skill { name: "Scikit-learn", icon: "🔬" },
        Skill { name: "LangChain", icon: "🔗" },
        Skill { name: "Firebase", icon: "🔥" },
        Skill { name: "Streamlit", icon: "🚀" },
        Skill { name: "Data Analysis", icon: "📊" },
        Skill { name: "Web Development", icon: "🌐" },
        Skill { name: "Cloud Computing", icon: "☁️" },
        Skill { name: "Bootstrap", icon: "🎨" },
        Skill { name: "Material-UI", icon: "🎨" },
        Skill { name: "Node.js", icon: "🟢" },
        Skill { name: "Express.js", icon: "⚡" },
        Skill { name: "Django", icon: "🎸" },
        Skill { name: "JWT Auth", icon: "🔐" },
        Skill { name: "FCM", icon: "🔔" },
        Skill { name: "MongoDB", icon: "🍃" },
        Skill { name: "NoSQL", icon: "🗄️" },
        Skill { name: "BART model", icon: "🤖" },
        Skill { name: "Collaborative Filtering", icon: "🤝" },
        Skill { name: "Power BI", icon: "📊" },
        Skill { name: "Matplotlib", icon: "📈" },
        Skill { name: "pandas", icon: "🐼" },
        Skill { name: "Ethereum", icon: "💎" },
        Skill { name: "Polygon", icon: "🔷" },
        Skill { name: "Docker", icon: "🐳" },
        Skill { name: "Microfrontends", icon: "🧩" },
        Skill { name: "Git & GitHub", icon: "🐙" },
        Skill { name: "Routing", icon: "🗺️" },
        Skill { name: "Responsive Design", icon: "📱" },
    ],
    projects: &[
        Project {
            title: "SparkFeed (AI News App)",
            description: "AI-powered news aggregator with summarization and personalization.",
            tech: &["Streamlit", "Firebase", "Android SDK", "Python"],
            link: "#",
            image: Some("https://placehold.co/400x300/1a202c/3a86ff?text=SparkFeed"),
        },
        Project {
            title: "Lost and Found Application",
            description: "A community platform for listing and finding lost and found items.",
            tech: &["React", "Firebase", "Google Maps API"],
            link: "#",
            image: Some("https://placehold.co/400x300/1a202c/3a86ff?text=Lost+and+Found"),
        },
        Project {
            title: "Food Delivery Analysis Dashboard",
            description: "A Power BI dashboard providing deep analytics on food delivery trends.",
            tech: &["Power BI", "Data Analysis", "SQL"],
            link: "#",
            image: Some("https://placehold.co/400x300/1a202c/3a86ff?text=Delivery+Dashboard"),
        },
        Project {
            title: "Protocol Upgrade Monitor",
            description: "A blockchain monitoring system providing real-time trading insights.",
            tech: &["Blockchain", "Web3.js", "Python"],
            link: "#",
            image: Some("https://placehold.co/400x300/1a202c/3a86ff?text=Upgrade+Monitor"),
        },
        Project {
            title: "OrbitalTrack (Satellite Tracker)",
            description: "A platform for tracking satellites with real-time analytics.",
            tech: &["Python", "API Integration", "Data Visualization"],
            link: "#",
            image: Some("https://placehold.co/400x300/1a202c/3a86ff?text=OrbitalTrack"),
        },
        Project {
            title: "Microfrontend News Aggregator",
            description: "A responsive news aggregator app built using microfrontend architecture.",
            tech: &["React", "Microfrontends", "Webpack"],
            link: "#",
            image: None,
        },
    ],
    contact_blurb: "I'm always open to new opportunities and collaborations. Feel free to reach out to me!",
    email: "nirvan.naveenn@gmail.com",
    socials: &[
        SocialLink {
            label: "LinkedIn",
            href: "https://www.linkedin.com/in/nirvan-naveen-b06a47242/",
        },
        SocialLink {
            label: "Instagram",
            href: "https://www.instagram.com/nirvan.08/",
        },
        SocialLink {
            label: "GitHub",
            href: "https://github.com/nirvan-08",
        },
    ],
    resume: ResumeAsset {
        path: "/resume.pdf",
        download_name: "Nirvan_Naveen_Resume.pdf",
    },
    animation_url: "https://lottie.host/81b21852-5204-4b5b-9d41-d575c3f91574/8rG8aB4mD4.json",
};
